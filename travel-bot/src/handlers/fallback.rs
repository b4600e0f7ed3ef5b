//! Terminal handler for text that no dialogue step consumed.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, MessageKind, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use super::display_name;
use crate::session::SessionStore;
use crate::texts;

/// Greets on "привет" (any case), otherwise points to /help.
pub struct FallbackHandler {
    bot: Arc<dyn Bot>,
    sessions: Arc<dyn SessionStore>,
}

impl FallbackHandler {
    pub fn new(bot: Arc<dyn Bot>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { bot, sessions }
    }
}

#[async_trait]
impl Handler for FallbackHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Text {
            return Ok(HandlerResponse::Ignore);
        }
        self.sessions.get_or_create(message.user.id).await;

        let reply = if message.content.trim().to_lowercase() == "привет" {
            texts::greeting(display_name(message))
        } else {
            texts::NOT_UNDERSTOOD.to_string()
        };
        info!(user_id = message.user.id, "step: FallbackHandler replying");
        self.bot.send_message(&message.chat, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
