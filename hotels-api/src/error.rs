//! Errors of the hotels4 client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelsApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body carried `"result": "ERROR"`.
    #[error("Upstream reported an error: {0}")]
    Upstream(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HotelsApiError>;
