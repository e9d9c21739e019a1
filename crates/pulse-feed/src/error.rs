//! Feed error types.
//!
//! Every error class is absorbed at the poller boundary as a feed-state
//! transition; none propagate into price memory or conclusion
//! derivation.

use pulse_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<ClientError> for FeedError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Network(msg) => Self::Network(msg),
            ClientError::Parse(msg) => Self::Parse(msg),
            ClientError::Upstream { status, message } => {
                Self::Upstream(format!("{status}: {message}"))
            }
            ClientError::HttpClient(msg) => Self::Network(msg),
        }
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
