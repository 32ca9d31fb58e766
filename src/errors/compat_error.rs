//! Custom error types for the probe

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use crate::types::EndpointStatus;

#[derive(Error, Debug)]
pub enum CompatError {
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Request timeout after {after:?}")]
    Timeout { after: Duration },

    #[error("Malformed response: {context}")]
    MalformedResponse { context: String },

    #[error("Stream error: {message}")]
    Stream { message: String },

    #[error("Invalid configuration: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Failed to write report to {}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

pub type CompatResult<T> = Result<T, CompatError>;

impl CompatError {
    pub fn transport(message: impl Into<String>) -> Self {
        CompatError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Status an endpoint probe records when its request ends in this error.
    pub fn endpoint_status(&self) -> EndpointStatus {
        match self {
            CompatError::Timeout { .. } => EndpointStatus::Timeout,
            CompatError::MalformedResponse { .. } => EndpointStatus::Fail,
            _ => EndpointStatus::Error,
        }
    }

    /// Issue text recorded on the result. Timeouts use a fixed wording so
    /// reports stay comparable across runs.
    pub fn issue(&self) -> String {
        match self {
            CompatError::Timeout { .. } => "Request timeout".to_string(),
            other => other.to_string(),
        }
    }

    /// Maps a reqwest failure from a client built with `limit` as its timeout.
    pub fn from_reqwest(error: reqwest::Error, limit: Duration) -> Self {
        if error.is_timeout() {
            return CompatError::Timeout { after: limit };
        }
        CompatError::Transport {
            message: error.to_string(),
            source: Some(error.into()),
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CompatError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        CompatError::Stream {
            message: error.to_string(),
        }
    }
}
