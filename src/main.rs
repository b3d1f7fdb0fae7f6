use anyhow::Result;
use tracing::{info, warn};

use mention_digest::ai::AnthropicClient;
use mention_digest::core::config::AppConfig;
use mention_digest::slack::SlackMentionClient;
use mention_digest::summarize::summarize_mentions;

#[tokio::main]
async fn main() -> Result<()> {
    mention_digest::setup_logging();

    info!("Starting Slack mention digest run");
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Missing required configuration: {e}"))?;

    let slack = SlackMentionClient::new(
        config.slack_user_token.clone(),
        config.slack_user_id.clone(),
    );

    info!("Fetching mentions from the last 24 hours");
    let mentions = slack.mentions_since_yesterday().await;
    info!("Found {} mentions", mentions.len());

    info!("Generating summary");
    let backend = AnthropicClient::new(config.anthropic_api_key.clone());
    let digest = summarize_mentions(&backend, &mentions).await?;

    info!("Delivering digest via DM");
    if !slack.send_dm_to_self(&digest).await {
        warn!("Digest was generated but could not be delivered");
    }

    info!("Run completed");
    Ok(())
}
