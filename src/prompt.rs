//! Prompt construction for the mention digest.
//!
//! Rendering is deterministic: one numbered stanza per mention, in the order
//! the search returned them, embedded in a fixed instruction template.

use crate::core::models::MentionRecord;

/// Fixed reply for a run that found no mentions. Returned without calling
/// the summarization API.
pub const NO_MENTIONS_NOTICE: &str = "📭 You had no mentions in the last 24 hours.";

/// Instructions wrapped around the rendered mentions. The contract is the
/// stanza shape and the tiering directions, not this exact wording.
const SUMMARY_INSTRUCTIONS: &str = "Below are the Slack mentions one user received over the last 24 hours.
Summarize them as follows:

1. Start with a single overview sentence covering the main themes.
2. Group the mentions into three sections, each under an emoji-prefixed header:
   🔥 Urgent: things that clearly need a response or action soon
   📌 Not urgent: worth reading, but not time-critical
   💬 Other: FYIs, social chatter, automated notices
3. Under each section, write one bullet per mention in the form:
   - <author> in #<channel>: <one-line gist> (<permalink>)
4. Use plain text with '-' bullets only. No tables, no code blocks, no nested
   lists; the result is posted as a chat message.";

/// Renders one stanza per mention, numbered from 1, preserving batch order.
pub fn render_mentions(mentions: &[MentionRecord]) -> String {
    let mut out = String::new();
    for (i, mention) in mentions.iter().enumerate() {
        out.push_str(&format!("\n--- Mention {} ---\n", i + 1));
        out.push_str(&format!("From: {}\n", mention.user));
        out.push_str(&format!("Channel: #{}\n", mention.channel));
        out.push_str(&format!("Time: {}\n", mention.timestamp));
        out.push_str(&format!("Text: {}\n", mention.text));
        out.push_str(&format!("Link: {}\n", mention.permalink));
    }
    out
}

/// Embeds the rendered mentions in the summarization instructions.
pub fn build_prompt(mentions: &[MentionRecord]) -> String {
    format!(
        "{SUMMARY_INSTRUCTIONS}\n\nMentions:\n{}\nKeep the summary easy to scan and make action items obvious.",
        render_mentions(mentions)
    )
}
