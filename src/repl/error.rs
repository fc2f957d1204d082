//! # Domain Errors
//!
//! Failures that surface to the user as a displayed message. None of them
//! end the interaction loop; terminal I/O failures use `anyhow` instead.

use std::time::Duration;

/// Recoverable failures carried in outcome events and the response snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReqlineError {
    /// The request did not complete within the configured timeout
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Connection, TLS or protocol failure reported by the transport
    #[error("transport error: {0}")]
    Transport(String),

    /// The draft could not be turned into a request (method, URL or header)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be decoded
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// A URL or the collection text could not be parsed
    #[error("failed to parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// The system clipboard could not be read
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

impl ReqlineError {
    pub fn parse(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this failure came from the transport side of a dispatch
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Transport(_) | Self::InvalidRequest(_) | Self::Decode(_)
        )
    }
}

impl From<reqwest::Error> for ReqlineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
