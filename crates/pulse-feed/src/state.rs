//! Feed lifecycle state.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Consecutive missed fetches after which a feed is considered stale.
pub const STALE_MISS_THRESHOLD: u32 = 2;

/// Lifecycle state of one feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedState {
    /// Never fetched.
    Idle,
    /// First fetch in flight, nothing to show yet.
    Loading,
    /// Last fetch succeeded.
    Success,
    /// Last fetch failed; previous data still displayed.
    Error,
    /// Missed the freshness threshold; previous data still displayed.
    Stale,
}

/// Published state of one feed.
///
/// `data` always retains the last successful payload: a failing feed
/// shows stale-but-displayed data next to its error marker rather than
/// blanking out.
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot<T> {
    /// Lifecycle state.
    pub state: FeedState,
    /// Last successful payload, if any ever landed.
    pub data: Option<T>,
    /// When the last successful fetch landed.
    pub last_success_at: Option<DateTime<Utc>>,
    /// Message of the most recent failure, cleared on success.
    pub last_error: Option<String>,
    /// Failed fetches since the last success.
    pub consecutive_misses: u32,
}

impl<T> FeedSnapshot<T> {
    /// Snapshot of a feed that has never fetched.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            state: FeedState::Idle,
            data: None,
            last_success_at: None,
            last_error: None,
            consecutive_misses: 0,
        }
    }

    /// Whether the last fetch succeeded.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.state == FeedState::Success
    }

    /// Transition into Loading for the very first fetch.
    ///
    /// Later fetches keep the previous state visible while the request
    /// is in flight.
    pub(crate) fn mark_loading(&mut self) {
        if self.state == FeedState::Idle {
            self.state = FeedState::Loading;
        }
    }

    /// Apply a successful fetch.
    pub(crate) fn record_success(&mut self, data: T) {
        self.state = FeedState::Success;
        self.data = Some(data);
        self.last_success_at = Some(Utc::now());
        self.last_error = None;
        self.consecutive_misses = 0;
    }

    /// Apply a failed fetch. Data is retained.
    pub(crate) fn record_failure(&mut self, error: String) {
        self.consecutive_misses = self.consecutive_misses.saturating_add(1);
        self.state = if self.consecutive_misses >= STALE_MISS_THRESHOLD {
            FeedState::Stale
        } else {
            FeedState::Error
        };
        self.last_error = Some(error);
    }
}
