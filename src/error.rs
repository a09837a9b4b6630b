//! Error types surfaced by the artifact fetchers.

use thiserror::Error;

/// A non-success HTTP response, carrying the server's message and status.
///
/// `message` is the response body text, or the status text when the body
/// is empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status_code})")]
pub struct RequestError {
    pub message: String,
    pub status_code: u16,
}

impl RequestError {
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }
}

/// Failure while turning a fetched blob into text or bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The decode worker finished without reporting a result.
    #[error("artifact decode was aborted before completing")]
    Aborted,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid artifact location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("failed to decode artifact: {0}")]
    Decode(#[from] DecodeError),
}

impl FetchError {
    /// HTTP status of the failed request, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Request(e) => Some(e.status_code),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
