//! Shared fakes for dialogue tests: a recording bot, a scripted hotels API, and message builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, DbotError, InlineOption, Message, MessageKind, User};
use hotels_api::models::{SuggestionEntity, SuggestionGroup};
use hotels_api::{HotelsApi, LocationSearchResponse, Property, PropertyQuery};
use travel_bot::{build_handler_chain, InMemorySessionStore, SessionStore};
use handler_chain::HandlerChain;

pub const USER_ID: i64 = 501;
pub const CHAT_ID: i64 = 501;

/// Everything the bot sent, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text(String),
    Options { text: String, options: Vec<InlineOption> },
    Answer { query_id: String, text: Option<String> },
    Cleared { message_id: String },
}

#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    expired_queries: AtomicBool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bot whose button answers fail the way Telegram rejects presses older than its answer window.
    pub fn with_expired_queries() -> Self {
        let bot = Self::default();
        bot.expired_queries.store(true, Ordering::SeqCst);
        bot
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Returns and forgets what was sent so far.
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Options of the last message sent with options.
    pub fn last_options(&self) -> Option<(String, Vec<InlineOption>)> {
        self.sent().into_iter().rev().find_map(|s| match s {
            Sent::Options { text, options } => Some((text, options)),
            _ => None,
        })
    }

    fn push(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> dbot_core::Result<()> {
        self.push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_options(&self, _chat: &Chat, text: &str, options: &[InlineOption]) -> dbot_core::Result<()> {
        self.push(Sent::Options {
            text: text.to_string(),
            options: options.to_vec(),
        });
        Ok(())
    }

    async fn answer_callback(&self, query_id: &str, text: Option<&str>) -> dbot_core::Result<()> {
        if self.expired_queries.load(Ordering::SeqCst) {
            return Err(DbotError::Bot(
                "Bad Request: query is too old and response timeout expired or query ID is invalid".to_string(),
            ));
        }
        self.push(Sent::Answer {
            query_id: query_id.to_string(),
            text: text.map(str::to_string),
        });
        Ok(())
    }

    async fn clear_options(&self, _chat: &Chat, message_id: &str) -> dbot_core::Result<()> {
        self.push(Sent::Cleared {
            message_id: message_id.to_string(),
        });
        Ok(())
    }
}

/// Hotels API with a fixed lookup response and queued listing pages.
#[derive(Default)]
pub struct FakeHotelsApi {
    pub locations: Mutex<LocationSearchResponse>,
    pub pages: Mutex<VecDeque<Vec<Property>>>,
    pub queries: Mutex<Vec<PropertyQuery>>,
}

impl FakeHotelsApi {
    pub fn new(cities: &[(&str, &str)], pages: Vec<Vec<Property>>) -> Self {
        Self {
            locations: Mutex::new(city_response(cities)),
            pages: Mutex::new(pages.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<PropertyQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl HotelsApi for FakeHotelsApi {
    async fn search_locations(&self, _query: &str) -> hotels_api::Result<LocationSearchResponse> {
        Ok(self.locations.lock().unwrap().clone())
    }

    async fn list_properties(&self, query: &PropertyQuery) -> hotels_api::Result<Vec<Property>> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Lookup response with one CITY_GROUP; captions carry highlight markup like the real API.
pub fn city_response(cities: &[(&str, &str)]) -> LocationSearchResponse {
    let entities = cities
        .iter()
        .map(|(id, caption)| SuggestionEntity {
            destination_id: id.to_string(),
            kind: "CITY".to_string(),
            caption: format!("<span class='highlighted'>{}</span>", caption),
            name: caption.to_string(),
        })
        .collect();
    LocationSearchResponse {
        suggestions: Some(vec![SuggestionGroup {
            group: "CITY_GROUP".to_string(),
            entities,
        }]),
    }
}

pub fn property(name: &str, price: f64, distance: &str) -> Property {
    Property {
        name: name.to_string(),
        street_address: Some(format!("{} street", name)),
        price_label: Some(format!("{} RUB", price)),
        exact_price: Some(price),
        landmark_distance: Some(distance.to_string()),
    }
}

fn user(id: i64) -> User {
    User {
        id,
        username: Some("traveller".to_string()),
        first_name: Some("Анна".to_string()),
        last_name: None,
    }
}

fn chat() -> Chat {
    Chat {
        id: CHAT_ID,
        chat_type: "private".to_string(),
    }
}

pub fn text(content: &str) -> Message {
    Message {
        id: "100".to_string(),
        user: user(USER_ID),
        chat: chat(),
        content: content.to_string(),
        kind: MessageKind::Text,
        created_at: Utc::now(),
    }
}

/// Button press on message 200 by `user_id`.
pub fn press(payload: &str, user_id: i64) -> Message {
    Message {
        id: "200".to_string(),
        user: user(user_id),
        chat: chat(),
        content: payload.to_string(),
        kind: MessageKind::Callback {
            query_id: "q-1".to_string(),
        },
        created_at: Utc::now(),
    }
}

pub struct Harness {
    pub bot: Arc<MockBot>,
    pub api: Arc<FakeHotelsApi>,
    pub sessions: Arc<InMemorySessionStore>,
    pub chain: HandlerChain,
}

impl Harness {
    pub fn new(api: FakeHotelsApi) -> Self {
        Self::with_bot(MockBot::new(), api)
    }

    pub fn with_bot(bot: MockBot, api: FakeHotelsApi) -> Self {
        let bot = Arc::new(bot);
        let api = Arc::new(api);
        let sessions = Arc::new(InMemorySessionStore::new());
        let store: Arc<dyn SessionStore> = sessions.clone();
        let chain = build_handler_chain(bot.clone(), api.clone(), store);
        Self {
            bot,
            api,
            sessions,
            chain,
        }
    }

    pub async fn send(&self, content: &str) {
        self.chain.handle(&text(content)).await.unwrap();
    }

    pub async fn press(&self, payload: &str) {
        self.chain.handle(&press(payload, USER_ID)).await.unwrap();
    }
}
