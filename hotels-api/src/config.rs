//! Hotels API configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

/// Settings needed to talk to the hotels4 API.
pub trait HotelsApiConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn host(&self) -> &str;
    fn locale(&self) -> &str;
    fn currency(&self) -> &str;
    /// Landmark the best-deal distance is measured from.
    fn landmark(&self) -> &str;
    fn timeout_secs(&self) -> u64;
}

/// Hotels API config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvHotelsApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub host: String,
    pub locale: String,
    pub currency: String,
    pub landmark: String,
    pub timeout_secs: u64,
}

impl HotelsApiConfig for EnvHotelsApiConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> &str {
        &self.base_url
    }
    fn host(&self) -> &str {
        &self.host
    }
    fn locale(&self) -> &str {
        &self.locale
    }
    fn currency(&self) -> &str {
        &self.currency
    }
    fn landmark(&self) -> &str {
        &self.landmark
    }
    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl EnvHotelsApiConfig {
    /// Load from environment variables. RAPIDAPI_KEY is required (API_KEY accepted as fallback).
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("RAPIDAPI_KEY")
            .or_else(|_| env::var("API_KEY"))
            .context("RAPIDAPI_KEY (or API_KEY) not set")?;
        let defaults = Self::with_api_key(api_key);
        Ok(Self {
            base_url: env::var("HOTELS_API_URL").unwrap_or(defaults.base_url),
            host: env::var("HOTELS_API_HOST").unwrap_or(defaults.host),
            locale: env::var("HOTELS_LOCALE").unwrap_or(defaults.locale),
            currency: env::var("HOTELS_CURRENCY").unwrap_or(defaults.currency),
            landmark: env::var("HOTELS_LANDMARK").unwrap_or(defaults.landmark),
            timeout_secs: env::var("HOTELS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            api_key: defaults.api_key,
        })
    }

    /// Defaults for everything except the key.
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://hotels4.p.rapidapi.com".to_string(),
            host: "hotels4.p.rapidapi.com".to_string(),
            locale: "ru_RU".to_string(),
            currency: "RUB".to_string(),
            landmark: "City center".to_string(),
            timeout_secs: 30,
        }
    }

    /// Overrides the base URL (e.g. a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
