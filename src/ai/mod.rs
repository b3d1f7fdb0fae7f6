//! Summarization API integration.

pub mod client;

use async_trait::async_trait;

use crate::errors::DigestError;

// Re-export main types for convenience
pub use client::{AnthropicClient, MAX_OUTPUT_TOKENS, MODEL};

/// A single-call summarization backend.
///
/// The engine depends on this seam instead of a concrete client so tests can
/// substitute a fake and count invocations.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends one user-role prompt and returns the model's text verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, DigestError>;
}

/// How a rejected API call should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailureKind {
    /// Billing or rate problems, e.g. an exhausted credit balance.
    RateOrCreditExhausted,
    /// The API judged the request itself invalid.
    InvalidRequest,
    /// Anything else; fatal for the run.
    Other,
}

impl ApiFailureKind {
    /// Recoverable failures degrade to a raw listing instead of failing the
    /// run.
    pub fn is_recoverable(self) -> bool {
        !matches!(self, ApiFailureKind::Other)
    }
}

/// Maps the error envelope of a rejected API call onto an [`ApiFailureKind`].
///
/// The API reports failures as a category string plus a human-readable
/// message; the billing case is only distinguishable by substring.
pub fn classify_api_failure(error_type: &str, message: &str) -> ApiFailureKind {
    let message = message.to_ascii_lowercase();
    if message.contains("credit balance is too low")
        || error_type == "billing_error"
        || error_type == "rate_limit_error"
    {
        ApiFailureKind::RateOrCreditExhausted
    } else if error_type == "invalid_request_error" {
        ApiFailureKind::InvalidRequest
    } else {
        ApiFailureKind::Other
    }
}
