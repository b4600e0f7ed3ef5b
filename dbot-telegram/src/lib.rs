//! # dbot-telegram
//!
//! Telegram transport layer: adapters, [`dbot_core::Bot`] implementation, minimal config, dispatcher runner.
//! Handles only Telegram connectivity and handler-chain execution; no dialogue or search logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, DEFAULT_RECONNECT_DELAY_SECS};
pub use runner::{polling_action, run_dispatcher, PollingAction};
