use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_user_token: String,
    pub slack_user_id: String,
    pub anthropic_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            slack_user_token: env::var("SLACK_USER_TOKEN")
                .map_err(|e| format!("SLACK_USER_TOKEN: {}", e))?,
            slack_user_id: env::var("SLACK_USER_ID")
                .map_err(|e| format!("SLACK_USER_ID: {}", e))?,
            anthropic_api_key: env::var("ANTHROPIC_API_KEY")
                .map_err(|e| format!("ANTHROPIC_API_KEY: {}", e))?,
        })
    }
}
