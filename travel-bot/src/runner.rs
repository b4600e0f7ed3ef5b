//! Wiring: tracing, Telegram adapter, hotels4 client, session store and handler chain, then the dispatcher.

use anyhow::{Context, Result};
use dbot_core::{init_tracing, Bot};
use dbot_telegram::{run_dispatcher, TelegramBotAdapter};
use handler_chain::HandlerChain;
use hotels_api::{mask_token, HotelsApi, HotelsApiConfig, RapidApiHotelsClient};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::handlers::{CommandHandler, DialogueHandler, FallbackHandler};
use crate::session::{InMemorySessionStore, SessionStore};

/// Chain order: commands first so they interrupt any dialogue step, then the dialogue, then fallback replies.
pub fn build_handler_chain(
    bot: Arc<dyn Bot>,
    api: Arc<dyn HotelsApi>,
    sessions: Arc<dyn SessionStore>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(bot.clone(), sessions.clone())))
        .add_handler(Arc::new(DialogueHandler::new(bot.clone(), sessions.clone(), api)))
        .add_handler(Arc::new(FallbackHandler::new(bot, sessions)))
}

/// Main entry: validate config, init logging, build the chain, then poll until the dispatcher stops.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let telegram = config.base().telegram_config();
    let teloxide_bot = telegram.build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let api: Arc<dyn HotelsApi> = Arc::new(
        RapidApiHotelsClient::new(config.hotels()).context("Failed to build hotels API client")?,
    );
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let handler_chain = build_handler_chain(bot, api, sessions);

    info!(
        bot_token = %mask_token(config.bot_token()),
        hotels_api = %config.hotels().base_url(),
        reconnect_delay_secs = config.reconnect_delay_secs(),
        "Bot started successfully"
    );

    run_dispatcher(teloxide_bot, handler_chain, telegram.reconnect_delay()).await
}
