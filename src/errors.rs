use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Failed to access Slack API: {0}")]
    SlackApi(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Summarization API rejected the request ({error_type}): {message}")]
    AiApi { error_type: String, message: String },

    #[error("Summarization response contained no text block")]
    EmptyCompletion,
}

impl From<SlackClientError> for DigestError {
    fn from(error: SlackClientError) -> Self {
        DigestError::SlackApi(error.to_string())
    }
}

impl From<reqwest::Error> for DigestError {
    fn from(error: reqwest::Error) -> Self {
        DigestError::Http(error.to_string())
    }
}

impl From<anyhow::Error> for DigestError {
    fn from(error: anyhow::Error) -> Self {
        DigestError::SlackApi(error.to_string())
    }
}
