//! Bot configuration: BaseConfig (Telegram + log + polling) + hotels4 API config.

mod base;
mod bot_config;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
