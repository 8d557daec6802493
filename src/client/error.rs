use bytes::Bytes;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Everything a request can fail with. Payloads are carried as received;
/// nothing here rewrites server or transport errors.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with {status}")]
    Status { status: StatusCode, body: Bytes },

    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to open upload part {name}: {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// The server's error body parsed as JSON, when there is one.
    pub fn body_json(&self) -> Option<Value> {
        match self {
            ClientError::Status { body, .. } => serde_json::from_slice(body).ok(),
            _ => None,
        }
    }
}
