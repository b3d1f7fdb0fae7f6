use serde::{Deserialize, Serialize};

/// One normalized mention pulled from the Slack search results.
///
/// Every field is always present; values the search payload omits are
/// replaced with placeholders at construction time. Records are immutable
/// once built and carry no identity beyond structural equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRecord {
    /// Raw message body, possibly containing Slack markup.
    pub text: String,
    /// Display name of the author, `"Unknown"` when Slack omits it.
    pub user: String,
    /// Channel name without the leading `#`, `"Unknown"` when omitted.
    pub channel: String,
    /// Service-native `ts` token, carried verbatim.
    pub timestamp: String,
    /// Stable link to the message, empty when unavailable.
    pub permalink: String,
}

impl MentionRecord {
    /// Builds a record from the raw `search.messages` match fields.
    pub fn from_search_parts(
        text: Option<String>,
        username: Option<String>,
        channel_name: Option<String>,
        timestamp: String,
        permalink: Option<String>,
    ) -> Self {
        Self {
            text: text.unwrap_or_default(),
            user: username.unwrap_or_else(|| "Unknown".to_string()),
            channel: channel_name.unwrap_or_else(|| "Unknown".to_string()),
            timestamp,
            permalink: permalink.unwrap_or_default(),
        }
    }
}
