//! Anthropic Messages API client.
//!
//! Owns the outbound transport for the one summarization call a run makes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tokio_retry::Retry;
use tracing::info;

use crate::errors::DigestError;

use super::CompletionBackend;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Model used for every summarization call.
pub const MODEL: &str = "claude-sonnet-4-5-20250929";

/// Output budget for one summary.
pub const MAX_OUTPUT_TOKENS: u32 = 2000;

/// Transport-level retries below the API-call boundary.
const TRANSPORT_RETRIES: usize = 3;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: MODEL.to_string(),
        }
    }
}

#[async_trait]
impl CompletionBackend for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, DigestError> {
        info!("Requesting summary from model {}", self.model);

        // Scoped transport: dropped on success, classified failure, and
        // re-raise alike. The job must behave identically whether or not the
        // host sets proxy variables, so ambient proxies are ignored.
        let client = Client::builder()
            .no_proxy()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DigestError::Http(format!("Failed to build HTTP client: {e}")))?;

        let body = json!({
            "model": self.model,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let strategy = ExponentialBackoff::from_millis(250)
            .map(jitter)
            .take(TRANSPORT_RETRIES);
        let response = Retry::spawn(strategy, || async {
            client
                .post(MESSAGES_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| DigestError::Http(format!("Summarization request failed: {e}")))
        })
        .await?;

        if !response.status().is_success() {
            let status = response.status();
            let envelope: ApiErrorEnvelope = response.json().await.unwrap_or_default();
            let (error_type, message) = match envelope.error {
                Some(err) => (err.kind, err.message),
                None => ("unknown".to_string(), format!("HTTP {status}")),
            };
            return Err(DigestError::AiApi {
                error_type,
                message,
            });
        }

        let parsed: MessagesResponse =
            response.json().await.map_err(|e| DigestError::AiApi {
                error_type: "parse_error".to_string(),
                message: format!("Malformed summarization response: {e}"),
            })?;

        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or(DigestError::EmptyCompletion)
    }
}
