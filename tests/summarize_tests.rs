use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mention_digest::ai::CompletionBackend;
use mention_digest::core::models::MentionRecord;
use mention_digest::errors::DigestError;
use mention_digest::prompt::NO_MENTIONS_NOTICE;
use mention_digest::summarize::{PREVIEW_CHARS, count_header, degraded_listing, summarize_mentions};

enum Reply {
    Text(&'static str),
    ApiError {
        error_type: &'static str,
        message: &'static str,
    },
}

/// Counting stand-in for the real summarization client.
struct FakeBackend {
    reply: Reply,
    calls: AtomicUsize,
}

impl FakeBackend {
    fn text(reply: &'static str) -> Self {
        Self {
            reply: Reply::Text(reply),
            calls: AtomicUsize::new(0),
        }
    }

    fn api_error(error_type: &'static str, message: &'static str) -> Self {
        Self {
            reply: Reply::ApiError {
                error_type,
                message,
            },
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for FakeBackend {
    async fn complete(&self, _prompt: &str) -> Result<String, DigestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Text(text) => Ok((*text).to_string()),
            Reply::ApiError {
                error_type,
                message,
            } => Err(DigestError::AiApi {
                error_type: (*error_type).to_string(),
                message: (*message).to_string(),
            }),
        }
    }
}

fn batch(n: usize) -> Vec<MentionRecord> {
    (1..=n)
        .map(|i| MentionRecord {
            text: format!("message number {i}"),
            user: format!("user{i}"),
            channel: format!("channel{i}"),
            timestamp: format!("{i}.000"),
            permalink: format!("https://slack.example/p{i}"),
        })
        .collect()
}

#[tokio::test]
async fn test_empty_batch_short_circuits_without_api_call() {
    let backend = FakeBackend::text("SUMMARY");

    let result = summarize_mentions(&backend, &[]).await.unwrap();

    assert_eq!(result, NO_MENTIONS_NOTICE);
    assert_eq!(backend.calls(), 0, "Empty batch must never reach the API");
}

#[tokio::test]
async fn test_header_count_matches_batch_length() {
    for n in [1usize, 2, 100] {
        let backend = FakeBackend::text("SUMMARY");
        let result = summarize_mentions(&backend, &batch(n)).await.unwrap();

        assert!(
            result.starts_with(&count_header(n)),
            "Header must carry the true count for {n} mentions. Actual: {result}"
        );
        assert_eq!(backend.calls(), 1);
    }
}

#[tokio::test]
async fn test_successful_summary_format_end_to_end() {
    let backend = FakeBackend::text("SUMMARY");

    let result = summarize_mentions(&backend, &batch(2)).await.unwrap();

    assert_eq!(
        result,
        format!("{}\n\nSUMMARY", count_header(2)),
        "Final text is the count header, a blank line, then the model text"
    );
}

#[tokio::test]
async fn test_credit_exhaustion_degrades_instead_of_raising() {
    let backend = FakeBackend::api_error(
        "invalid_request_error",
        "Your credit balance is too low to access the Anthropic API.",
    );
    let mentions = batch(3);

    let result = summarize_mentions(&backend, &mentions).await.unwrap();

    assert!(result.starts_with(&count_header(3)));
    assert!(result.contains("unavailable"));
    assert!(result.contains("1. user1 in #channel1:"));
    assert!(result.contains("2. user2 in #channel2:"));
    assert!(result.contains("3. user3 in #channel3:"));
}

#[tokio::test]
async fn test_unrelated_api_error_propagates() {
    let backend = FakeBackend::api_error("overloaded_error", "Overloaded");

    let result = summarize_mentions(&backend, &batch(2)).await;

    match result {
        Err(DigestError::AiApi { error_type, .. }) => {
            assert_eq!(error_type, "overloaded_error");
        }
        other => panic!("Expected the API error to propagate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_error_propagates() {
    struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, DigestError> {
            Err(DigestError::Http("connection reset".to_string()))
        }
    }

    let result = summarize_mentions(&FailingBackend, &batch(1)).await;
    assert!(matches!(result, Err(DigestError::Http(_))));
}

#[test]
fn test_degraded_listing_preserves_order() {
    let mentions = batch(3);
    let listing = degraded_listing(&mentions);

    let first = listing.find("1. user1").expect("first entry missing");
    let second = listing.find("2. user2").expect("second entry missing");
    let third = listing.find("3. user3").expect("third entry missing");
    assert!(first < second && second < third);
}

#[test]
fn test_degraded_listing_truncates_long_bodies_to_preview_chars() {
    let long_body = format!("{}{}", "x".repeat(PREVIEW_CHARS), "HIDDEN-TAIL");
    let mentions = vec![MentionRecord {
        text: long_body,
        user: "alice".to_string(),
        channel: "general".to_string(),
        timestamp: "1.000".to_string(),
        permalink: "https://slack.example/p1".to_string(),
    }];

    let listing = degraded_listing(&mentions);

    let truncated = format!("{}...", "x".repeat(PREVIEW_CHARS));
    assert!(listing.contains(&truncated));
    assert!(
        !listing.contains("HIDDEN-TAIL"),
        "Text beyond {PREVIEW_CHARS} characters must be cut"
    );
}

#[test]
fn test_degraded_listing_appends_marker_to_short_bodies_too() {
    // Short bodies keep the trailing marker as well; the listing format is
    // uniform across entries.
    let mentions = vec![MentionRecord {
        text: "short".to_string(),
        user: "alice".to_string(),
        channel: "general".to_string(),
        timestamp: "1.000".to_string(),
        permalink: "".to_string(),
    }];

    let listing = degraded_listing(&mentions);

    assert!(listing.contains("short..."));
}

#[test]
fn test_degraded_listing_includes_permalinks() {
    let mentions = batch(2);
    let listing = degraded_listing(&mentions);

    assert!(listing.contains("https://slack.example/p1"));
    assert!(listing.contains("https://slack.example/p2"));
}
