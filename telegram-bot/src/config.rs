//! Bot configuration, loaded from environment variables.

use std::env;

use anyhow::Result;

/// Runtime configuration. `/analyze` is only enabled when an API key for the
/// text-analysis service is present.
pub struct BotConfig {
    pub bot_token: String,
    pub database_url: String,
    pub log_file: String,
    /// Lifetime of cached analytics results, in seconds.
    pub cache_ttl_secs: u64,
    /// Optional Telegram Bot API base URL (points tests at a mock server).
    pub telegram_api_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub analyze_model: String,
}

impl BotConfig {
    /// Loads configuration from the environment. If `token` is given it
    /// overrides `BOT_TOKEN`.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:chat_stats.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/statbot.log".to_string());
        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1200);
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let analyze_model =
            env::var("ANALYZE_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(Self {
            bot_token,
            database_url,
            log_file,
            cache_ttl_secs,
            telegram_api_url,
            openai_api_key,
            openai_base_url,
            analyze_model,
        })
    }
}
