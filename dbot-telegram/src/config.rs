//! Minimal transport config: token, optional API URL and polling reconnect delay.
//! The application fills it from its own environment layer.

use anyhow::Result;
use std::time::Duration;

/// Delay before the single polling reconnect after a read timeout.
pub const DEFAULT_RECONNECT_DELAY_SECS: u64 = 1000;

/// Minimal Telegram config (connectivity only).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub reconnect_delay_secs: u64,
}

impl TelegramConfig {
    /// Builds config with the given token; other fields default.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            reconnect_delay_secs: DEFAULT_RECONNECT_DELAY_SECS,
        }
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    /// Builds the teloxide Bot, pointing it at `telegram_api_url` when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url.as_deref() {
            Some(url_str) => {
                let url = reqwest::Url::parse(url_str).map_err(|e| {
                    anyhow::anyhow!("TELEGRAM_API_URL is not a valid URL ({}): {}", url_str, e)
                })?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
