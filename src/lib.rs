//! mention-digest - a single-shot batch job that DMs a user a summary of
//! their Slack mentions from the last 24 hours.
//!
//! Each run fetches the mentions via `search.messages`, asks the Anthropic
//! Messages API for a structured summary, posts the result to the user's own
//! DM channel, and exits. There is no state between runs; the external
//! scheduler simply reruns the job.
//!
//! # Architecture
//!
//! The system uses:
//! - slack-morphism for Slack API interactions
//! - reqwest for the Web API calls slack-morphism does not cover and for the
//!   Anthropic Messages API
//! - Tokio for the async runtime
//! - tokio-retry for bounded retries on both transports
//!
//! # Example
//!
//! ```no_run
//! use mention_digest::ai::AnthropicClient;
//! use mention_digest::core::config::AppConfig;
//! use mention_digest::slack::SlackMentionClient;
//! use mention_digest::summarize::summarize_mentions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     mention_digest::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let slack = SlackMentionClient::new(
//!         config.slack_user_token.clone(),
//!         config.slack_user_id.clone(),
//!     );
//!
//!     let mentions = slack.mentions_since_yesterday().await;
//!     let backend = AnthropicClient::new(config.anthropic_api_key.clone());
//!     let digest = summarize_mentions(&backend, &mentions).await?;
//!     slack.send_dm_to_self(&digest).await;
//!
//!     Ok(())
//! }
//! ```
// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod slack;
pub mod summarize;

/// Configure console logging for a batch run.
///
/// Installs a plain-text tracing-subscriber fmt layer. Output is
/// informational for the operator watching the run, not a structured log
/// format.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry().with(fmt_layer).init();
}
