//! # Travel bot application
//!
//! Hotel search over Telegram. Wires the handler chain (commands, dialogue, fallback), the session store
//! and the hotels4 client, then runs the dispatcher.

pub mod callback;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod runner;
pub mod session;
pub mod texts;

pub use callback::{CallbackPayload, RecoveryAction};
pub use cli::{load_config, Cli, Commands};
pub use config::{BaseConfig, BotConfig};
pub use handlers::{CommandHandler, DialogueHandler, FallbackHandler};
pub use runner::{build_handler_chain, run_bot};
pub use session::{
    BoundPair, DialogueStep, InMemorySessionStore, SearchMode, Session, SessionStore,
};
