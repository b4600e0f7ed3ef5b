//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Text messages become [`MessageKind::Text`]; inline button presses become [`MessageKind::Callback`].

use dbot_core::{Chat, Message, MessageKind, ToCoreMessage, ToCoreUser, User};

fn chat_type_label(chat: &teloxide::types::Chat) -> String {
    if chat.is_private() {
        "private".to_string()
    } else {
        "group".to_string()
    }
}

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to a core text [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: self.0.chat.id.0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: chat_type_label(&self.0.chat),
            },
            content: self.0.text().unwrap_or("").to_string(),
            kind: MessageKind::Text,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Wraps a teloxide CallbackQuery for conversion to a core callback [`Message`].
///
/// `id` is the id of the message that carried the pressed button (empty when Telegram no longer has it);
/// when that message is unavailable the chat falls back to the presser's private chat.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreMessage for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Message {
        let query = self.0;
        let user = TelegramUserWrapper(&query.from).to_core();
        let (id, chat) = match query.message.as_ref() {
            Some(carrier) => (
                carrier.id().to_string(),
                Chat {
                    id: carrier.chat().id.0,
                    chat_type: chat_type_label(carrier.chat()),
                },
            ),
            None => (
                String::new(),
                Chat {
                    id: user.id,
                    chat_type: "private".to_string(),
                },
            ),
        };
        Message {
            id,
            user,
            chat,
            content: query.data.clone().unwrap_or_default(),
            kind: MessageKind::Callback {
                query_id: query.id.to_string(),
            },
            created_at: chrono::Utc::now(),
        }
    }
}
