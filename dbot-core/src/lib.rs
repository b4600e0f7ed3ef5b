//! # dbot-core
//!
//! Core types and traits for the chat front-end: [`Bot`] gateway, [`Handler`], message and user types,
//! and tracing initialization. Transport-agnostic; used by dbot-telegram, handler-chain and travel-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot, InlineOption};
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, MessageKind, ToCoreMessage, ToCoreUser, User};
