//! # Handler chain
//!
//! Runs a sequence of handlers for each incoming message (text or button press). Every handler's `before`
//! runs first (any false stops the chain); then `handle` runs in order until one returns Stop or Reply;
//! then every `after` runs in reverse order with the final response.

use dbot_core::{Handler, HandlerResponse, Message, MessageKind, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered handlers sharing one message: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn handler_name(handler: &Arc<dyn Handler>) -> &'static str {
    std::any::type_name_of_val(handler.as_ref())
}

fn kind_label(message: &Message) -> &'static str {
    match message.kind {
        MessageKind::Text => "text",
        MessageKind::Callback { .. } => "callback",
    }
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; handlers run in insertion order.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the three phases and returns the first Stop or Reply, or Continue when no handler consumed the message.
    #[instrument(skip(self, message), fields(user_id = message.user.id, kind = kind_label(message)))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain started"
        );

        if !self.run_before(message).await? {
            return Ok(HandlerResponse::Stop);
        }
        let final_response = self.run_handle(message).await?;
        self.run_after(message, &final_response).await?;

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            response = ?final_response,
            "step: handler_chain finished"
        );
        Ok(final_response)
    }

    async fn run_before(&self, message: &Message) -> Result<bool> {
        for h in &self.handlers {
            let name = handler_name(h);
            if !h.before(message).await? {
                info!(user_id = message.user.id, handler = %name, "step: before returned false, chain stopped");
                return Ok(false);
            }
            debug!(user_id = message.user.id, handler = %name, "step: handler before done");
        }
        Ok(true)
    }

    async fn run_handle(&self, message: &Message) -> Result<HandlerResponse> {
        for h in &self.handlers {
            let name = handler_name(h);
            let response = h.handle(message).await?;
            debug!(user_id = message.user.id, handler = %name, response = ?response, "step: handler handle done");
            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(user_id = message.user.id, handler = %name, "step: message consumed by handler");
                    return Ok(response);
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }
        Ok(HandlerResponse::Continue)
    }

    async fn run_after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        for h in self.handlers.iter().rev() {
            h.after(message, response).await?;
            debug!(user_id = message.user.id, handler = %handler_name(h), "step: handler after done");
        }
        Ok(())
    }
}

// Integration tests live in tests/handler_chain_test.rs
