//! Dialogue controller: reads the next text or button press according to the user's [`DialogueStep`],
//! collects search parameters, runs the search and renders the results.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, InlineOption, Message, Result};
use hotel_search::{parse_decimal, PagedSearch, StayWindow};
use hotels_api::{CityCandidate, HotelsApi};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::callback::{CallbackPayload, RecoveryAction};
use crate::session::{BoundPair, DialogueStep, SearchMode, Session, SessionStore};
use crate::texts;

/// Largest number of hotels a user may ask for.
pub const MAX_RESULT_LIMIT: i64 = 25;

fn min_step(pair: BoundPair) -> DialogueStep {
    match pair {
        BoundPair::Price => DialogueStep::MinPrice,
        BoundPair::Distance => DialogueStep::MinDistance,
    }
}

fn min_prompt(pair: BoundPair) -> &'static str {
    match pair {
        BoundPair::Price => texts::MIN_PRICE_PROMPT,
        BoundPair::Distance => texts::MIN_DISTANCE_PROMPT,
    }
}

/// Parses a bound value: decimal comma accepted, sign dropped.
fn parse_bound(text: &str) -> Option<f64> {
    parse_decimal(text).map(f64::abs)
}

/// Drives the per-user state machine. Text outside a dialogue step is left to the next handler.
pub struct DialogueHandler {
    bot: Arc<dyn Bot>,
    sessions: Arc<dyn SessionStore>,
    api: Arc<dyn HotelsApi>,
    search: PagedSearch,
}

impl DialogueHandler {
    pub fn new(bot: Arc<dyn Bot>, sessions: Arc<dyn SessionStore>, api: Arc<dyn HotelsApi>) -> Self {
        let search = PagedSearch::new(api.clone());
        Self {
            bot,
            sessions,
            api,
            search,
        }
    }

    // ---------- text steps ----------

    async fn on_text(&self, message: &Message) -> Result<HandlerResponse> {
        if message.is_command() {
            return Ok(HandlerResponse::Ignore);
        }
        let Some(handle) = self.sessions.get(message.user.id).await else {
            return Ok(HandlerResponse::Ignore);
        };
        let mut session = handle.lock().await;
        let text = message.content.trim();

        info!(
            user_id = message.user.id,
            step = ?session.step,
            mode = ?session.mode,
            "step: dialogue text received"
        );

        match session.step {
            DialogueStep::Idle => return Ok(HandlerResponse::Ignore),
            DialogueStep::DestinationQuery | DialogueStep::DestinationChoice => {
                self.lookup_destination(message, &mut session, text).await?
            }
            DialogueStep::MinPrice => self.read_min(message, &mut session, BoundPair::Price, text).await?,
            DialogueStep::MaxPrice => self.read_max(message, &mut session, BoundPair::Price, text).await?,
            DialogueStep::MinDistance => {
                self.read_min(message, &mut session, BoundPair::Distance, text).await?
            }
            DialogueStep::MaxDistance => {
                self.read_max(message, &mut session, BoundPair::Distance, text).await?
            }
            DialogueStep::BoundConflict(pair) => self.send_conflict(message, &session, pair).await?,
            DialogueStep::ResultLimit => self.read_limit(message, &mut session, text).await?,
        }
        Ok(HandlerResponse::Stop)
    }

    async fn lookup_destination(&self, message: &Message, session: &mut Session, query: &str) -> Result<()> {
        session.candidates.clear();
        session.step = DialogueStep::DestinationQuery;

        let candidates = match self.api.search_locations(query).await {
            Ok(response) => response.city_candidates(),
            Err(e) => {
                warn!(user_id = message.user.id, error = %e, "Destination lookup failed");
                None
            }
        };

        match candidates {
            None => {
                self.bot.send_message(&message.chat, texts::LOOKUP_FAILED).await?;
                self.bot.send_message(&message.chat, texts::CITY_PROMPT).await
            }
            Some(cities) if cities.is_empty() => {
                info!(user_id = message.user.id, query = %query, "step: no cities found, asking again");
                self.bot.send_message(&message.chat, texts::NO_CITIES).await?;
                self.bot.send_message(&message.chat, texts::CITY_PROMPT).await
            }
            Some(cities) => {
                info!(
                    user_id = message.user.id,
                    query = %query,
                    candidates = cities.len(),
                    "step: offering city candidates"
                );
                let options = city_options(&cities, message.user.id);
                session.candidates = cities;
                session.step = DialogueStep::DestinationChoice;
                self.bot
                    .send_options(&message.chat, texts::CITY_CHOICE, &options)
                    .await
            }
        }
    }

    async fn read_min(&self, message: &Message, session: &mut Session, pair: BoundPair, text: &str) -> Result<()> {
        let Some(value) = parse_bound(text) else {
            return self.bot.send_message(&message.chat, texts::NOT_A_NUMBER).await;
        };
        session.set_min(pair, value);
        let (next_step, prompt) = match pair {
            BoundPair::Price => (DialogueStep::MaxPrice, texts::MAX_PRICE_PROMPT),
            BoundPair::Distance => (DialogueStep::MaxDistance, texts::MAX_DISTANCE_PROMPT),
        };
        session.step = next_step;
        info!(user_id = message.user.id, pair = pair.as_str(), min = value, "step: minimum accepted");
        self.bot.send_message(&message.chat, prompt).await
    }

    async fn read_max(&self, message: &Message, session: &mut Session, pair: BoundPair, text: &str) -> Result<()> {
        let Some(value) = parse_bound(text) else {
            return self.bot.send_message(&message.chat, texts::NOT_A_NUMBER).await;
        };
        session.set_max(pair, value);
        let (min, max) = session.bounds(pair);
        if max > min {
            info!(user_id = message.user.id, pair = pair.as_str(), min, max, "step: maximum accepted");
            return self.advance_after(message, session, pair).await;
        }
        info!(user_id = message.user.id, pair = pair.as_str(), min, max, "step: bound conflict");
        session.step = DialogueStep::BoundConflict(pair);
        self.send_conflict(message, session, pair).await
    }

    /// Prompts the step that follows a complete pair.
    async fn advance_after(&self, message: &Message, session: &mut Session, pair: BoundPair) -> Result<()> {
        let (next_step, prompt) = match pair {
            BoundPair::Price => (DialogueStep::MinDistance, texts::MIN_DISTANCE_PROMPT),
            BoundPair::Distance => (DialogueStep::ResultLimit, texts::LIMIT_PROMPT),
        };
        session.step = next_step;
        self.bot.send_message(&message.chat, prompt).await
    }

    /// Offers rewrite, and swap when swapping would resolve the conflict.
    async fn send_conflict(&self, message: &Message, session: &Session, pair: BoundPair) -> Result<()> {
        let (min, max) = session.bounds(pair);
        let mut options = Vec::with_capacity(2);
        if min > max {
            options.push(recovery_option(texts::SWAP_OPTION, RecoveryAction::Swap, pair, message.user.id));
        }
        options.push(recovery_option(texts::REWRITE_OPTION, RecoveryAction::Rewrite, pair, message.user.id));
        self.bot
            .send_options(&message.chat, texts::conflict(pair), &options)
            .await
    }

    async fn read_limit(&self, message: &Message, session: &mut Session, text: &str) -> Result<()> {
        let reply = match text.parse::<i64>() {
            Err(_) => texts::LIMIT_NOT_INTEGER,
            Ok(n) if n > MAX_RESULT_LIMIT => texts::LIMIT_TOO_LARGE,
            Ok(n) if n < 1 => texts::LIMIT_TOO_SMALL,
            Ok(n) => {
                session.result_limit = n as usize;
                self.bot.send_message(&message.chat, texts::SEARCH_STARTED).await?;
                return self.run_search(message, session).await;
            }
        };
        self.bot.send_message(&message.chat, reply).await
    }

    async fn run_search(&self, message: &Message, session: &mut Session) -> Result<()> {
        let (Some(strategy), Some(destination_id)) = (session.strategy(), session.destination_id.clone()) else {
            warn!(user_id = message.user.id, "Search requested without mode or destination");
            session.reset();
            self.bot.send_message(&message.chat, texts::FAILURE).await?;
            return self.bot.send_message(&message.chat, texts::HELLO_HINT).await;
        };
        let limit = session.result_limit;
        info!(
            user_id = message.user.id,
            mode = ?session.mode,
            destination_id = %destination_id,
            limit,
            "step: search started"
        );

        let results = self
            .search
            .run(&destination_id, &strategy, limit, StayWindow::tonight())
            .await;

        if results.is_empty() {
            info!(user_id = message.user.id, "step: no results, asking for another city");
            session.step = DialogueStep::DestinationQuery;
            self.bot.send_message(&message.chat, texts::NO_RESULTS).await?;
            return self.bot.send_message(&message.chat, texts::CITY_PROMPT).await;
        }

        for (name, rendered) in results.iter() {
            self.bot
                .send_message(&message.chat, &texts::hotel(name, rendered))
                .await?;
        }
        if results.size() < limit {
            self.bot
                .send_message(&message.chat, &texts::short_count(results.size()))
                .await?;
        }
        session.step = DialogueStep::Idle;
        info!(user_id = message.user.id, found = results.size(), "step: results shown");
        Ok(())
    }

    // ---------- button presses ----------

    async fn on_callback(&self, message: &Message, query_id: &str) -> Result<HandlerResponse> {
        let payload = match message.content.parse::<CallbackPayload>() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(user_id = message.user.id, error = %e, "Undecodable callback payload");
                self.acknowledge(message, query_id, None).await;
                return Ok(HandlerResponse::Stop);
            }
        };
        if payload.user_id() != message.user.id {
            warn!(
                user_id = message.user.id,
                owner_id = payload.user_id(),
                "Button pressed by a user it was not sent to"
            );
            self.acknowledge(message, query_id, None).await;
            return Ok(HandlerResponse::Stop);
        }

        let Some(handle) = self.sessions.get(payload.user_id()).await else {
            self.on_stale(message, query_id).await?;
            return Ok(HandlerResponse::Stop);
        };
        let mut session = handle.lock().await;

        match payload {
            CallbackPayload::Destination { destination_id, .. } => {
                self.choose_destination(message, query_id, &mut session, &destination_id)
                    .await?
            }
            CallbackPayload::Recovery { action, pair, .. } => {
                self.recover(message, query_id, &mut session, action, pair).await?
            }
        }
        Ok(HandlerResponse::Stop)
    }

    /// Button press from a user the bot has no state for (e.g. after a restart).
    async fn on_stale(&self, message: &Message, query_id: &str) -> Result<()> {
        warn!(user_id = message.user.id, "Button pressed without a session");
        self.acknowledge(message, query_id, None).await;
        self.clear_options(message).await;
        self.sessions.get_or_create(message.user.id).await;
        self.bot.send_message(&message.chat, texts::FAILURE).await?;
        self.bot.send_message(&message.chat, texts::HELLO_HINT).await
    }

    async fn choose_destination(
        &self,
        message: &Message,
        query_id: &str,
        session: &mut Session,
        destination_id: &str,
    ) -> Result<()> {
        let city = match (session.step, session.candidate(destination_id)) {
            (DialogueStep::DestinationChoice, Some(city)) => city.clone(),
            _ => {
                info!(user_id = message.user.id, destination_id, "step: city not among current candidates");
                self.acknowledge(message, query_id, None).await;
                return self.bot.send_message(&message.chat, texts::WRONG_CITY).await;
            }
        };

        self.acknowledge(message, query_id, Some(&texts::chosen(&city.caption)))
            .await;
        self.clear_options(message).await;
        self.bot
            .send_message(&message.chat, &texts::results_for(&city.caption))
            .await?;

        session.destination_id = Some(city.destination_id);
        let (next_step, prompt) = match session.mode {
            Some(SearchMode::BestDeal) => (DialogueStep::MinPrice, texts::MIN_PRICE_PROMPT),
            _ => (DialogueStep::ResultLimit, texts::LIMIT_PROMPT),
        };
        session.step = next_step;
        info!(
            user_id = message.user.id,
            destination_id,
            next_step = ?next_step,
            "step: city chosen"
        );
        self.bot.send_message(&message.chat, prompt).await
    }

    async fn recover(
        &self,
        message: &Message,
        query_id: &str,
        session: &mut Session,
        action: RecoveryAction,
        pair: BoundPair,
    ) -> Result<()> {
        if session.step != DialogueStep::BoundConflict(pair) {
            info!(user_id = message.user.id, pair = pair.as_str(), "step: outdated recovery button");
            self.acknowledge(message, query_id, None).await;
            self.clear_options(message).await;
            return Ok(());
        }

        match action {
            RecoveryAction::Swap => {
                let (min, max) = session.bounds(pair);
                if min <= max {
                    self.acknowledge(message, query_id, None).await;
                    return Ok(());
                }
                let label = texts::chosen(texts::SWAP_OPTION);
                self.acknowledge(message, query_id, Some(&label)).await;
                self.clear_options(message).await;
                session.swap_bounds(pair);
                let (min, max) = session.bounds(pair);
                info!(user_id = message.user.id, pair = pair.as_str(), min, max, "step: bounds swapped");
                self.bot.send_message(&message.chat, &label).await?;
                self.bot
                    .send_message(&message.chat, &texts::swapped(min, max))
                    .await?;
                self.advance_after(message, session, pair).await
            }
            RecoveryAction::Rewrite => {
                let label = texts::chosen(texts::REWRITE_OPTION);
                self.acknowledge(message, query_id, Some(&label)).await;
                self.clear_options(message).await;
                session.step = min_step(pair);
                info!(user_id = message.user.id, pair = pair.as_str(), "step: rewriting bounds");
                self.bot.send_message(&message.chat, &label).await?;
                self.bot.send_message(&message.chat, min_prompt(pair)).await
            }
        }
    }

    /// Answers the button press; an expired query must not cost the user the step.
    async fn acknowledge(&self, message: &Message, query_id: &str, text: Option<&str>) {
        if let Err(e) = self.bot.answer_callback(query_id, text).await {
            warn!(user_id = message.user.id, query_id, error = %e, "Failed to answer button press");
        }
    }

    /// Removes the keyboard from the pressed message; failure only costs a stale keyboard.
    async fn clear_options(&self, message: &Message) {
        if let Err(e) = self.bot.clear_options(&message.chat, &message.id).await {
            warn!(user_id = message.user.id, message_id = %message.id, error = %e, "Failed to remove options");
        }
    }
}

fn city_options(cities: &[CityCandidate], user_id: i64) -> Vec<InlineOption> {
    cities
        .iter()
        .map(|city| {
            let payload = CallbackPayload::Destination {
                destination_id: city.destination_id.clone(),
                user_id,
            };
            InlineOption::new(city.caption.clone(), payload.encode())
        })
        .collect()
}

fn recovery_option(label: &str, action: RecoveryAction, pair: BoundPair, user_id: i64) -> InlineOption {
    let payload = CallbackPayload::Recovery {
        action,
        pair,
        user_id,
    };
    InlineOption::new(label, payload.encode())
}

#[async_trait]
impl Handler for DialogueHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match message.callback_query_id() {
            Some(query_id) => self.on_callback(message, query_id).await,
            None => self.on_text(message).await,
        }
    }
}
