//! Typed inline-button payloads.
//!
//! Wire form is `<choice>|<user_id>`: `city:<destination_id>`, `swap:<pair>` or `rewrite:<pair>` before the bar.

use dbot_core::HandlerError;
use std::fmt;
use std::str::FromStr;

use crate::session::BoundPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Exchange min and max of the pair and continue.
    Swap,
    /// Enter the pair again starting from its minimum.
    Rewrite,
}

impl RecoveryAction {
    fn as_str(&self) -> &'static str {
        match self {
            RecoveryAction::Swap => "swap",
            RecoveryAction::Rewrite => "rewrite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackPayload {
    Destination {
        destination_id: String,
        user_id: i64,
    },
    Recovery {
        action: RecoveryAction,
        pair: BoundPair,
        user_id: i64,
    },
}

impl CallbackPayload {
    /// The user the buttons were sent to.
    pub fn user_id(&self) -> i64 {
        match self {
            CallbackPayload::Destination { user_id, .. } | CallbackPayload::Recovery { user_id, .. } => {
                *user_id
            }
        }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CallbackPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackPayload::Destination {
                destination_id,
                user_id,
            } => write!(f, "city:{}|{}", destination_id, user_id),
            CallbackPayload::Recovery {
                action,
                pair,
                user_id,
            } => write!(f, "{}:{}|{}", action.as_str(), pair.as_str(), user_id),
        }
    }
}

impl FromStr for CallbackPayload {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HandlerError::InvalidPayload(s.to_string());
        let (choice, user) = s.rsplit_once('|').ok_or_else(invalid)?;
        let user_id: i64 = user.parse().map_err(|_| invalid())?;
        let (kind, value) = choice.split_once(':').ok_or_else(invalid)?;
        if value.is_empty() {
            return Err(invalid());
        }
        match kind {
            "city" => Ok(CallbackPayload::Destination {
                destination_id: value.to_string(),
                user_id,
            }),
            "swap" | "rewrite" => {
                let pair = BoundPair::parse(value).ok_or_else(invalid)?;
                let action = if kind == "swap" {
                    RecoveryAction::Swap
                } else {
                    RecoveryAction::Rewrite
                };
                Ok(CallbackPayload::Recovery {
                    action,
                    pair,
                    user_id,
                })
            }
            _ => Err(invalid()),
        }
    }
}
