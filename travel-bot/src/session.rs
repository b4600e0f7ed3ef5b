//! Per-user conversation state and the store holding it for the process lifetime.

use async_trait::async_trait;
use hotel_search::{DealBounds, SearchStrategy};
use hotels_api::CityCandidate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Selected search kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Cheapest,
    MostExpensive,
    BestDeal,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Cheapest => "lowprice",
            SearchMode::MostExpensive => "highprice",
            SearchMode::BestDeal => "bestdeal",
        }
    }
}

/// Which min/max pair a bound step or recovery action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundPair {
    Price,
    Distance,
}

impl BoundPair {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundPair::Price => "price",
            BoundPair::Distance => "distance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "price" => Some(BoundPair::Price),
            "distance" => Some(BoundPair::Distance),
            _ => None,
        }
    }
}

/// Where the user is in the dialogue; decides how the next text message is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStep {
    /// No dialogue in progress (also after results were shown).
    Idle,
    /// Waiting for a city name.
    DestinationQuery,
    /// City options shown, waiting for a button press.
    DestinationChoice,
    MinPrice,
    MaxPrice,
    MinDistance,
    MaxDistance,
    /// max <= min was entered for the pair; waiting for swap or rewrite.
    BoundConflict(BoundPair),
    ResultLimit,
}

/// Conversation state of one user.
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: Option<SearchMode>,
    pub step: DialogueStep,
    pub destination_id: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub result_limit: usize,
    /// Cities offered by the last lookup; replaced on every new lookup.
    pub candidates: Vec<CityCandidate>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            mode: None,
            step: DialogueStep::Idle,
            destination_id: None,
            min_price: 0.0,
            max_price: 0.0,
            min_distance: 0.0,
            max_distance: 0.0,
            result_limit: 0,
            candidates: Vec::new(),
        }
    }
}

impl Session {
    /// Starts a new search in `mode`, discarding everything collected so far.
    pub fn start(&mut self, mode: SearchMode) {
        *self = Session {
            mode: Some(mode),
            step: DialogueStep::DestinationQuery,
            ..Session::default()
        };
    }

    /// Back to Idle with no mode.
    pub fn reset(&mut self) {
        self.mode = None;
        self.step = DialogueStep::Idle;
        self.candidates.clear();
    }

    pub fn bounds(&self, pair: BoundPair) -> (f64, f64) {
        match pair {
            BoundPair::Price => (self.min_price, self.max_price),
            BoundPair::Distance => (self.min_distance, self.max_distance),
        }
    }

    pub fn set_min(&mut self, pair: BoundPair, value: f64) {
        match pair {
            BoundPair::Price => self.min_price = value,
            BoundPair::Distance => self.min_distance = value,
        }
    }

    pub fn set_max(&mut self, pair: BoundPair, value: f64) {
        match pair {
            BoundPair::Price => self.max_price = value,
            BoundPair::Distance => self.max_distance = value,
        }
    }

    pub fn swap_bounds(&mut self, pair: BoundPair) {
        let (min, max) = self.bounds(pair);
        self.set_min(pair, max);
        self.set_max(pair, min);
    }

    pub fn candidate(&self, destination_id: &str) -> Option<&CityCandidate> {
        self.candidates
            .iter()
            .find(|c| c.destination_id == destination_id)
    }

    /// Strategy for the current mode and collected bounds; None when no mode is set.
    pub fn strategy(&self) -> Option<SearchStrategy> {
        match self.mode? {
            SearchMode::Cheapest => Some(SearchStrategy::Cheapest),
            SearchMode::MostExpensive => Some(SearchStrategy::MostExpensive),
            SearchMode::BestDeal => Some(SearchStrategy::BestDeal(DealBounds {
                min_price: self.min_price,
                max_price: self.max_price,
                min_distance: self.min_distance,
                max_distance: self.max_distance,
            })),
        }
    }
}

/// Shared handle to one user's session. Holding the lock serializes that user's dialogue.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Sessions keyed by user id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the user's session, creating an Idle one on first contact.
    async fn get_or_create(&self, user_id: i64) -> SessionHandle;
    async fn get(&self, user_id: i64) -> Option<SessionHandle>;
    async fn clear(&self, user_id: i64);
}

/// Process-lifetime store; sessions are never evicted.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<i64, SessionHandle>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, user_id: i64) -> SessionHandle {
        if let Some(session) = self.sessions.read().await.get(&user_id) {
            return session.clone();
        }
        self.sessions
            .write()
            .await
            .entry(user_id)
            .or_default()
            .clone()
    }

    async fn get(&self, user_id: i64) -> Option<SessionHandle> {
        self.sessions.read().await.get(&user_id).cloned()
    }

    async fn clear(&self, user_id: i64) {
        self.sessions.write().await.remove(&user_id);
    }
}
