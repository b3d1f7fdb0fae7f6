//! Slack API client module
//!
//! Encapsulates all Slack API interactions with retry logic and error
//! handling. Methods slack-morphism covers go through it; `search.messages`
//! is called over the Web API directly.

use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::*;
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackUserId,
};
use std::time::Duration;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tokio_retry::Retry;
use tracing::{error, info, warn};

use crate::core::models::MentionRecord;
use crate::errors::DigestError;

static SLACK_CLIENT: Lazy<SlackHyperClient> = Lazy::new(|| {
    SlackHyperClient::new(
        SlackClientHyperConnector::new().expect("Failed to create Slack client connector"),
    )
});

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
});

/// Most recent matches requested from `search.messages`.
const SEARCH_COUNT: u32 = 100;

/// `search.messages` response types
#[derive(Debug, Deserialize)]
struct SearchResponse {
    ok: bool,
    error: Option<String>,
    messages: Option<SearchMessages>,
}

#[derive(Debug, Deserialize)]
struct SearchMessages {
    #[serde(default)]
    matches: Vec<SearchMatch>,
}

#[derive(Debug, Deserialize)]
struct SearchMatch {
    text: Option<String>,
    username: Option<String>,
    channel: Option<SearchChannel>,
    #[serde(default)]
    ts: String,
    permalink: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchChannel {
    name: Option<String>,
}

impl SearchMatch {
    fn into_record(self) -> MentionRecord {
        MentionRecord::from_search_parts(
            self.text,
            self.username,
            self.channel.and_then(|c| c.name),
            self.ts,
            self.permalink,
        )
    }
}

/// Slack client bound to one user: searches their mentions and DMs them.
pub struct SlackMentionClient {
    token: SlackApiToken,
    user_id: String,
}

impl SlackMentionClient {
    pub fn new(token: String, user_id: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
            user_id,
        }
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, DigestError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, DigestError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(5);

        Retry::spawn(strategy, operation).await
    }

    /// Mentions of the bound user since yesterday, most recent first.
    ///
    /// A failed search degrades to an empty batch; losing mentions is
    /// preferred over failing the run.
    pub async fn mentions_since_yesterday(&self) -> Vec<MentionRecord> {
        match self.search_mentions().await {
            Ok(mentions) => mentions,
            Err(e) => {
                warn!("Error fetching mentions: {e}");
                Vec::new()
            }
        }
    }

    async fn search_mentions(&self) -> Result<Vec<MentionRecord>, DigestError> {
        let yesterday = chrono::Local::now() - chrono::Duration::days(1);
        let query = format!("<@{}> after:{}", self.user_id, yesterday.format("%Y-%m-%d"));
        let count = SEARCH_COUNT.to_string();

        let resp = HTTP_CLIENT
            .get("https://slack.com/api/search.messages")
            .bearer_auth(&self.token.token_value.0)
            .query(&[
                ("query", query.as_str()),
                ("sort", "timestamp"),
                ("sort_dir", "desc"),
                ("count", count.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DigestError::Http(format!("search.messages request failed: {e}")))?;

        let search: SearchResponse = resp
            .json()
            .await
            .map_err(|e| DigestError::SlackApi(format!("Failed to parse search response: {e}")))?;

        if !search.ok {
            return Err(DigestError::SlackApi(format!(
                "search.messages error: {}",
                search.error.unwrap_or_else(|| "unknown".to_string())
            )));
        }

        let matches = search.messages.map(|m| m.matches).unwrap_or_default();
        Ok(matches.into_iter().map(SearchMatch::into_record).collect())
    }

    /// Opens (or reuses) the IM channel with the bound user.
    pub async fn open_im_channel(&self) -> Result<String, DigestError> {
        self.with_retry(|| async {
            let session = SLACK_CLIENT.open_session(&self.token);
            let open_req = SlackApiConversationsOpenRequest::new()
                .with_users(vec![SlackUserId(self.user_id.clone())]);

            let result = session.conversations_open(&open_req).await?;
            let channel_id = result.channel.id.0;
            Ok(channel_id)
        })
        .await
    }

    /// Posts the digest to the user's own DM channel, link previews off so
    /// the permalinks don't unfurl into the digest.
    pub async fn send_dm_to_self(&self, message: &str) -> bool {
        match self.post_dm(message).await {
            Ok(()) => {
                info!("DM sent successfully");
                true
            }
            Err(e) => {
                error!("Error sending DM: {e}");
                false
            }
        }
    }

    async fn post_dm(&self, message: &str) -> Result<(), DigestError> {
        let channel_id = self.open_im_channel().await?;

        self.with_retry(|| async {
            let session = SLACK_CLIENT.open_session(&self.token);
            let post_req = SlackApiChatPostMessageRequest::new(
                SlackChannelId(channel_id.clone()),
                SlackMessageContent::new().with_text(message.to_string()),
            )
            .with_unfurl_links(false)
            .with_unfurl_media(false);

            session.chat_post_message(&post_req).await?;

            Ok(())
        })
        .await
    }
}
