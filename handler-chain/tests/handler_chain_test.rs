//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/after order, a before hook stopping the chain, a consuming handler hiding later handlers,
//! Ignore/Continue falling through, and Reply being passed to every after hook.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use dbot_core::{Chat, Handler, HandlerResponse, Message, MessageKind, User};
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        kind: MessageKind::Text,
        created_at: Utc::now(),
    }
}

/// Handler that records its phases into a shared log and answers `handle` with a fixed response.
struct RecordingHandler {
    name: &'static str,
    response: HandlerResponse,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingHandler {
    fn new(name: &'static str, response: HandlerResponse, log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self { name, response, log })
    }
}

#[async_trait::async_trait]
impl Handler for RecordingHandler {
    async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
        self.log.lock().unwrap().push(format!("before_{}", self.name));
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.log.lock().unwrap().push(format!("handle_{}", self.name));
        Ok(self.response.clone())
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> dbot_core::Result<()> {
        self.log.lock().unwrap().push(format!("after_{}", self.name));
        Ok(())
    }
}

/// **Test: Phases run before (in order) → handle (in order) → after (reverse).**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(RecordingHandler::new("first", HandlerResponse::Continue, log.clone()))
        .add_handler(RecordingHandler::new("second", HandlerResponse::Continue, log.clone()));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "before_first",
            "before_second",
            "handle_first",
            "handle_second",
            "after_second",
            "after_first"
        ]
    );
}

/// **Test: A handler returning Stop hides later handlers from the handle phase; every after still runs.**
#[tokio::test]
async fn test_stop_consumes_message() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(RecordingHandler::new("commands", HandlerResponse::Stop, log.clone()))
        .add_handler(RecordingHandler::new("fallback", HandlerResponse::Continue, log.clone()));

    let result = chain.handle(&create_test_message("/help")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    let log = log.lock().unwrap();
    assert!(log.contains(&"handle_commands".to_string()));
    assert!(!log.contains(&"handle_fallback".to_string()));
    assert!(log.contains(&"after_fallback".to_string()));
}

/// **Test: Ignore falls through to the next handler like Continue.**
#[tokio::test]
async fn test_ignore_falls_through() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(RecordingHandler::new("dialogue", HandlerResponse::Ignore, log.clone()))
        .add_handler(RecordingHandler::new("fallback", HandlerResponse::Stop, log.clone()));

    let result = chain.handle(&create_test_message("привет")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert!(log.lock().unwrap().contains(&"handle_fallback".to_string()));
}

/// **Test: A before hook returning false stops the chain; no handle runs.**
#[tokio::test]
async fn test_before_false_stops_chain() {
    struct BlockingHandler;

    #[async_trait::async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            Ok(false)
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(RecordingHandler::new("dialogue", HandlerResponse::Stop, log.clone()));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert!(!log.lock().unwrap().contains(&"handle_dialogue".to_string()));
}

/// **Test: Reply ends the handle phase and is passed to after hooks.**
#[tokio::test]
async fn test_reply_passed_to_after() {
    struct ReplyHandler;

    #[async_trait::async_trait]
    impl Handler for ReplyHandler {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Ok(HandlerResponse::Reply("Гостиница: A".to_string()))
        }
    }

    struct CaptureHandler {
        seen: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Handler for CaptureHandler {
        async fn after(&self, _message: &Message, response: &HandlerResponse) -> dbot_core::Result<()> {
            if let HandlerResponse::Reply(text) = response {
                assert_eq!(text, "Гостиница: A");
                self.seen.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    let seen = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureHandler { seen: seen.clone() }))
        .add_handler(Arc::new(ReplyHandler));

    let result = chain.handle(&create_test_message("5")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("Гостиница: A".to_string()));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(chain.len(), 2);
}
