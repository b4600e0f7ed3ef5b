//! BotConfig: BaseConfig + hotels4 API config. Use load() for env-based loading.

use anyhow::{Context, Result};
use hotels_api::{EnvHotelsApiConfig, HotelsApiConfig};

use super::BaseConfig;

/// Bot config: BaseConfig + hotels API. Use BotConfig::load() for env-based loading.
pub struct BotConfig {
    pub base: BaseConfig,
    pub hotels: EnvHotelsApiConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let hotels = EnvHotelsApiConfig::from_env().context("Failed to load hotels API config")?;
        Ok(Self { base, hotels })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        if self.hotels.api_key().trim().is_empty() {
            anyhow::bail!("RAPIDAPI_KEY is empty");
        }
        if reqwest::Url::parse(self.hotels.base_url()).is_err() {
            anyhow::bail!("HOTELS_API_URL is not a valid URL: {}", self.hotels.base_url());
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn hotels(&self) -> &EnvHotelsApiConfig {
        &self.hotels
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn reconnect_delay_secs(&self) -> u64 {
        self.base.reconnect_delay_secs
    }
}
