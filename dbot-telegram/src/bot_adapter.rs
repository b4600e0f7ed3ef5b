//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{parse_message_id, Bot as CoreBot, Chat, DbotError, InlineOption, Result};
use teloxide::{
    prelude::*,
    types::{CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId},
};

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

/// One option per keyboard row, so long city captions stay readable.
fn keyboard(options: &[InlineOption]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(options.iter().map(|option| {
        vec![InlineKeyboardButton::callback(
            option.label.clone(),
            option.payload.clone(),
        )]
    }))
}

fn transport_error(e: teloxide::RequestError) -> DbotError {
    DbotError::Bot(e.to_string())
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_options(&self, chat: &Chat, text: &str, options: &[InlineOption]) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(keyboard(options))
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn answer_callback(&self, query_id: &str, text: Option<&str>) -> Result<()> {
        let request = self
            .bot
            .answer_callback_query(CallbackQueryId(query_id.to_string()));
        match text {
            Some(text) => request.text(text.to_string()).await,
            None => request.await,
        }
        .map_err(transport_error)?;
        Ok(())
    }

    async fn clear_options(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_reply_markup(ChatId(chat.id), MessageId(id))
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}
