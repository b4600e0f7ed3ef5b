//! Slash commands. Any command interrupts the dialogue in progress.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use super::display_name;
use crate::session::{SearchMode, SessionStore};
use crate::texts;

/// Command word without arguments or a `@botname` suffix.
fn command_name(text: &str) -> &str {
    let word = text.split_whitespace().next().unwrap_or("");
    word.split('@').next().unwrap_or(word)
}

/// Handles `/start`, `/hello_world`, `/help`, the three search commands, and unknown commands.
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    sessions: Arc<dyn SessionStore>,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn Bot>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { bot, sessions }
    }

    async fn start_search(&self, message: &Message, mode: SearchMode) -> Result<()> {
        let session = self.sessions.get_or_create(message.user.id).await;
        session.lock().await.start(mode);
        info!(
            user_id = message.user.id,
            mode = mode.as_str(),
            "step: search mode selected, asking for city"
        );
        let announcement = match mode {
            SearchMode::Cheapest => texts::CHEAPEST_STARTED,
            SearchMode::MostExpensive => texts::MOST_EXPENSIVE_STARTED,
            SearchMode::BestDeal => texts::BEST_DEAL_STARTED,
        };
        self.bot.send_message(&message.chat, announcement).await?;
        self.bot.send_message(&message.chat, texts::CITY_PROMPT).await
    }

    async fn reset(&self, message: &Message) {
        let session = self.sessions.get_or_create(message.user.id).await;
        session.lock().await.reset();
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_command() {
            return Ok(HandlerResponse::Ignore);
        }
        let command = command_name(&message.content);
        info!(user_id = message.user.id, command = %command, "step: command received");

        match command {
            "/start" | "/hello_world" => {
                self.sessions.clear(message.user.id).await;
                self.sessions.get_or_create(message.user.id).await;
                self.bot
                    .send_message(&message.chat, &texts::greeting(display_name(message)))
                    .await?;
            }
            "/help" => {
                self.reset(message).await;
                self.bot.send_message(&message.chat, texts::HELP).await?;
            }
            "/lowprice" => self.start_search(message, SearchMode::Cheapest).await?,
            "/highprice" => self.start_search(message, SearchMode::MostExpensive).await?,
            "/bestdeal" => self.start_search(message, SearchMode::BestDeal).await?,
            _ => {
                self.reset(message).await;
                self.bot.send_message(&message.chat, texts::NOT_UNDERSTOOD).await?;
            }
        }
        Ok(HandlerResponse::Stop)
    }
}
