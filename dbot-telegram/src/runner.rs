//! Dispatcher runner: converts teloxide messages and callback queries to core::Message and passes them to HandlerChain.
//!
//! Updates of one chat are handled sequentially by the dispatcher, so a user's dialogue never sees two
//! messages at once. Polling errors go through [`ReconnectPolicy`]: the first read timeout sleeps and resumes,
//! anything else shuts the dispatcher down.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use futures::future::BoxFuture;
use handler_chain::HandlerChain;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use teloxide::{
    dispatching::{Dispatcher, ShutdownToken, UpdateFilterExt},
    dptree,
    error_handlers::{ErrorHandler, LoggingErrorHandler},
    prelude::*,
    types::Update,
    update_listeners, RequestError,
};
use tracing::{error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Number of polling reconnects allowed after a read timeout.
const MAX_RECONNECTS: u32 = 1;

/// What to do after a polling error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollingAction {
    /// Sleep for the delay, then resume polling.
    Reconnect(Duration),
    /// Log and stop the dispatcher.
    Shutdown,
}

/// Decides the reaction to a polling error given whether it was a read timeout and how many reconnects were used.
pub fn polling_action(is_read_timeout: bool, reconnects_used: u32, delay: Duration) -> PollingAction {
    if is_read_timeout && reconnects_used < MAX_RECONNECTS {
        PollingAction::Reconnect(delay)
    } else {
        PollingAction::Shutdown
    }
}

fn is_read_timeout(error: &RequestError) -> bool {
    match error {
        RequestError::Network(e) => e.is_timeout(),
        _ => false,
    }
}

/// Polling error handler applying [`polling_action`].
struct ReconnectPolicy {
    shutdown: ShutdownToken,
    delay: Duration,
    reconnects_used: AtomicU32,
}

impl ErrorHandler<RequestError> for ReconnectPolicy {
    fn handle_error(self: Arc<Self>, error: RequestError) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            let used = self.reconnects_used.load(Ordering::SeqCst);
            match polling_action(is_read_timeout(&error), used, self.delay) {
                PollingAction::Reconnect(delay) => {
                    self.reconnects_used.fetch_add(1, Ordering::SeqCst);
                    warn!(error = %error, delay_secs = delay.as_secs(), "Polling read timeout, reconnecting after delay");
                    tokio::time::sleep(delay).await;
                    info!("Reconnecting to Telegram servers");
                }
                PollingAction::Shutdown => {
                    error!(error = %error, "Unexpected polling error, stopping dispatcher");
                    // The returned future resolves once the dispatcher is idle; nothing here needs to wait for it.
                    if self.shutdown.shutdown().is_err() {
                        warn!("Dispatcher was not running when shutdown was requested");
                    }
                }
            }
        })
    }
}

async fn on_message(msg: teloxide::types::Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    match msg.text() {
        Some(text) => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_content = %text,
                "Received message"
            );
        }
        None => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                "Received non-text message, ignored"
            );
            return Ok(());
        }
    }
    if let Err(e) = chain.handle(&core_msg).await {
        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
    }
    Ok(())
}

async fn on_callback_query(
    query: teloxide::types::CallbackQuery,
    chain: HandlerChain,
) -> ResponseResult<()> {
    let core_msg = TelegramCallbackWrapper(&query).to_core();
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        payload = %core_msg.content,
        "Received callback query"
    );
    if let Err(e) = chain.handle(&core_msg).await {
        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
    }
    Ok(())
}

/// Starts long polling with the given teloxide Bot and HandlerChain; returns when the dispatcher stops.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    reconnect_delay: Duration,
) -> Result<()> {
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![handler_chain])
        .default_handler(|upd| async move {
            tracing::debug!(update = ?upd, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in update handler",
        ))
        .enable_ctrlc_handler()
        .build();

    let policy = Arc::new(ReconnectPolicy {
        shutdown: dispatcher.shutdown_token(),
        delay: reconnect_delay,
        reconnects_used: AtomicU32::new(0),
    });
    let listener = update_listeners::polling_default(bot).await;

    info!("Starting dispatcher with long polling");
    dispatcher.dispatch_with_listener(listener, policy).await;
    warn!("Dispatcher stopped");

    Ok(())
}
