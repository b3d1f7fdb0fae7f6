//! The summarization engine.
//!
//! Turns a batch of mentions into the final text delivered to the user: a
//! fixed notice for an empty batch, a model-written summary when the API
//! call succeeds, or a per-mention listing when the API is unusable.

use tracing::warn;

use crate::ai::{CompletionBackend, classify_api_failure};
use crate::core::models::MentionRecord;
use crate::errors::DigestError;
use crate::prompt::{NO_MENTIONS_NOTICE, build_prompt};

/// Characters of the message body shown per line in the degraded listing.
pub const PREVIEW_CHARS: usize = 80;

/// Header line carried by every non-empty digest. States the true batch
/// count even when the listing below it is degraded.
pub fn count_header(count: usize) -> String {
    format!("📬 *Mention summary for the last 24 hours* ({count} mentions)")
}

/// Produces the digest text for one batch of mentions.
///
/// An empty batch short-circuits to [`NO_MENTIONS_NOTICE`] without touching
/// the network. A rejection the classifier deems recoverable degrades to
/// [`degraded_listing`]; any other failure is propagated and fails the run.
pub async fn summarize_mentions<B>(
    backend: &B,
    mentions: &[MentionRecord],
) -> Result<String, DigestError>
where
    B: CompletionBackend + ?Sized,
{
    if mentions.is_empty() {
        return Ok(NO_MENTIONS_NOTICE.to_string());
    }

    let prompt = build_prompt(mentions);
    match backend.complete(&prompt).await {
        Ok(summary) => Ok(format!("{}\n\n{}", count_header(mentions.len()), summary)),
        Err(DigestError::AiApi {
            ref error_type,
            ref message,
        }) if classify_api_failure(error_type, message).is_recoverable() => {
            warn!("Summarization unavailable ({message}); falling back to a raw listing");
            Ok(degraded_listing(mentions))
        }
        Err(e) => Err(e),
    }
}

/// Unsummarized fallback: one line per mention, original batch order.
pub fn degraded_listing(mentions: &[MentionRecord]) -> String {
    let lines: Vec<String> = mentions
        .iter()
        .enumerate()
        .map(|(i, mention)| {
            format!(
                "{}. {} in #{}: {} ({})",
                i + 1,
                mention.user,
                mention.channel,
                preview(&mention.text),
                mention.permalink
            )
        })
        .collect();

    format!(
        "{}\n⚠️ The summarizer is currently unavailable; raw mentions below.\n\n{}",
        count_header(mentions.len()),
        lines.join("\n")
    )
}

// The marker is appended even when the body already fits in PREVIEW_CHARS.
fn preview(text: &str) -> String {
    let mut shortened: String = text.chars().take(PREVIEW_CHARS).collect();
    shortened.push_str("...");
    shortened
}
