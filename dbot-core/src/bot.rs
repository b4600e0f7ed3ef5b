//! Messaging gateway abstraction: send text, send text with selectable inline options, acknowledge a button press,
//! and remove the options from an already-sent message.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in dbot-telegram.

use crate::error::{DbotError, Result};
use crate::types::Chat;
use async_trait::async_trait;

/// One selectable option under a message. `payload` is echoed back as the content of the callback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineOption {
    pub label: String,
    pub payload: String,
}

impl InlineOption {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Outgoing side of the chat transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a text message with one option per row.
    async fn send_options(&self, chat: &Chat, text: &str, options: &[InlineOption]) -> Result<()>;
    /// Acknowledges a button press; `text` is shown to the user as a short notification when set.
    async fn answer_callback(&self, query_id: &str, text: Option<&str>) -> Result<()>;
    /// Removes the options from a message sent earlier. `message_id` is transport-specific (Telegram numeric string).
    async fn clear_options(&self, chat: &Chat, message_id: &str) -> Result<()>;
}

/// Parses a message id string into an i32. Used when editing a sent message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id for edit: {}", s)))
}
