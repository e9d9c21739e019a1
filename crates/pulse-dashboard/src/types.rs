//! Dashboard view types.
//!
//! These types are the serializable output of one render cycle. They
//! are built fresh from feed snapshots on every `collect_snapshot` call
//! and never mutated afterwards.

use chrono::{DateTime, Utc};
use pulse_client::{ExchangeStatus, MarketOverview, OpenTrade, SignalStatus};
use pulse_core::Conclusion;
use pulse_feed::{FeedSnapshot, FeedState};
use rust_decimal::Decimal;
use serde::Serialize;

/// Render-ready view of one feed: lifecycle state plus retained data.
///
/// `data` holds the last successful payload even in Error/Stale states,
/// so presentation shows stale-but-displayed values next to the error
/// marker instead of blanking.
#[derive(Debug, Clone, Serialize)]
pub struct FeedView<T> {
    /// Lifecycle state.
    pub state: FeedState,
    /// Last successful payload.
    pub data: Option<T>,
    /// When the last successful fetch landed.
    pub last_success_at: Option<DateTime<Utc>>,
    /// Most recent failure message.
    pub last_error: Option<String>,
}

impl<T> From<FeedSnapshot<T>> for FeedView<T> {
    fn from(snap: FeedSnapshot<T>) -> Self {
        Self {
            state: snap.state,
            data: snap.data,
            last_success_at: snap.last_success_at,
            last_error: snap.last_error,
        }
    }
}

/// One symbol row of the price board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolPrice {
    /// Symbol (e.g. "BTC-USDT").
    pub symbol: String,
    /// Last price.
    pub price: Decimal,
    /// Change percentage, 2 decimals.
    pub change_percent: Decimal,
    /// Exchange the quote came from.
    pub source: Option<String>,
    /// True when the change was derived from successive observations
    /// rather than supplied by the upstream as `change_24h`.
    pub change_is_derived: bool,
}

/// Conclusion for one timeframe of the composite signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeframeConclusion {
    /// Timeframe label ("15m", "1h", "4h", ...).
    pub timeframe: String,
    /// Derived verdict and its evidence category.
    pub conclusion: Conclusion,
    /// Candlestick pattern names the backend reported.
    pub patterns: Vec<String>,
}

/// Normalized composite-signal view for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct SignalView {
    /// The symbol the signal was requested for.
    pub symbol: String,
    /// Backend run status (SUCCESS or NEUTRAL; failures never get here).
    pub status: SignalStatus,
    /// Backend explanation, if any.
    pub message: Option<String>,
    /// Per-timeframe conclusions, in timeframe order.
    pub conclusions: Vec<TimeframeConclusion>,
}

/// Full dashboard snapshot: every feed merged into one immutable value.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Timestamp when the snapshot was taken (Unix milliseconds).
    pub timestamp_ms: i64,
    /// Exchange reachability feed.
    pub exchanges: FeedView<Vec<ExchangeStatus>>,
    /// Global market metrics feed.
    pub overview: FeedView<MarketOverview>,
    /// Per-symbol price feed with derived deltas.
    pub prices: FeedView<Vec<SymbolPrice>>,
    /// Composite signal feed with derived conclusions.
    pub signal: FeedView<SignalView>,
    /// Open positions feed.
    pub open_trades: FeedView<Vec<OpenTrade>>,
}

/// Health summary of one feed, for logs and metrics.
#[derive(Debug, Clone, Serialize)]
pub struct FeedHealth {
    /// Feed identifier.
    pub id: String,
    /// Lifecycle state.
    pub state: FeedState,
    /// Failed fetches since the last success.
    pub consecutive_misses: u32,
    /// Seconds since the last successful fetch.
    pub data_age_secs: Option<i64>,
}
