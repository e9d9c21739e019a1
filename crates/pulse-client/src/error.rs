//! Client error taxonomy.
//!
//! Three classes matter to callers: transport failures, malformed
//! bodies, and responses the backend itself marked as failed. All three
//! are absorbed at the feed-poller boundary as state transitions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Fetch/transport failure (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-JSON or malformed body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The backend answered but reported failure (non-2xx HTTP, or a
    /// composite-signal status other than SUCCESS/NEUTRAL).
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: String, message: String },

    /// HTTP client construction failure.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl ClientError {
    /// Classify a reqwest error as transport or decode failure.
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
