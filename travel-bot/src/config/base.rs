//! Base config: Telegram Bot connection, logging, polling reconnect. Loaded from env.

use anyhow::{Context, Result};
use dbot_telegram::{TelegramConfig, DEFAULT_RECONNECT_DELAY_SECS};
use std::env;

/// Base config: Telegram-related and logging only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// Sleep before the single polling reconnect after a read timeout
    pub reconnect_delay_secs: u64,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/travel-bot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let reconnect_delay_secs = env::var("POLLING_RECONNECT_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RECONNECT_DELAY_SECS);

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            reconnect_delay_secs,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    /// Transport config handed to dbot-telegram.
    pub fn telegram_config(&self) -> TelegramConfig {
        TelegramConfig {
            telegram_api_url: self.telegram_api_url.clone(),
            reconnect_delay_secs: self.reconnect_delay_secs,
            ..TelegramConfig::with_token(self.bot_token.clone())
        }
    }
}
