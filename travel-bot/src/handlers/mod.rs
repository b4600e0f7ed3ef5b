//! Handlers of the bot, in chain order: commands, dialogue steps and button presses, fallback replies.

mod command;
mod dialogue;
mod fallback;

pub use command::CommandHandler;
pub use dialogue::DialogueHandler;
pub use fallback::FallbackHandler;

use dbot_core::Message;

/// First name to address the user by; falls back to the username.
pub(crate) fn display_name(message: &Message) -> &str {
    message
        .user
        .first_name
        .as_deref()
        .or(message.user.username.as_deref())
        .unwrap_or("")
}
