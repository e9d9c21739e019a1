//! View state aggregation.
//!
//! `ViewState` owns one feed handle per backend endpoint and merges
//! their latest snapshots into one immutable `DashboardSnapshot` per
//! render cycle. It is the composition root's window into the polling
//! layer: manual refresh and teardown both go through here.

use std::time::Duration;

use chrono::Utc;
use pulse_client::{ExchangeStatus, MarketOverview, OpenTrade, PulseClient};
use pulse_engine::ConclusionEngine;
use pulse_feed::{FeedConfig, FeedHandle, FeedPoller, PriceMemoryHandle};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sources::{
    OverviewSource, PriceBoardSource, SignalSource, StatusSource, TradesSource,
};
use crate::types::{DashboardSnapshot, FeedHealth, SignalView, SymbolPrice};

/// Feed wiring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Exchange status poll interval (seconds).
    pub status_interval_secs: u64,
    /// Market overview poll interval (seconds).
    pub overview_interval_secs: u64,
    /// Price board poll interval (seconds).
    pub prices_interval_secs: u64,
    /// Composite signal poll interval (seconds).
    pub signal_interval_secs: u64,
    /// Open trades poll interval (seconds).
    pub trades_interval_secs: u64,
    /// Symbol the composite signal is requested for.
    pub signal_symbol: String,
    /// Price board endpoint path.
    pub price_path: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            status_interval_secs: 30,
            overview_interval_secs: 60,
            prices_interval_secs: 10,
            signal_interval_secs: 120,
            trades_interval_secs: 30,
            signal_symbol: "BTC-USDT".to_string(),
            price_path: pulse_client::DEFAULT_PRICE_PATH.to_string(),
        }
    }
}

/// Aggregated view over every registered feed.
#[derive(Debug, Clone)]
pub struct ViewState {
    exchanges: FeedHandle<Vec<ExchangeStatus>>,
    overview: FeedHandle<MarketOverview>,
    prices: FeedHandle<Vec<SymbolPrice>>,
    signal: FeedHandle<SignalView>,
    open_trades: FeedHandle<Vec<OpenTrade>>,
}

impl ViewState {
    /// Wire the standard five feeds against one backend client and
    /// spawn their pollers.
    pub fn spawn(
        client: PulseClient,
        memory: PriceMemoryHandle,
        engine: ConclusionEngine,
        config: &ViewConfig,
    ) -> Self {
        info!(
            signal_symbol = %config.signal_symbol,
            price_path = %config.price_path,
            "Spawning dashboard feeds"
        );

        let exchanges = FeedPoller::spawn(
            FeedConfig::new("status", Duration::from_secs(config.status_interval_secs)),
            StatusSource::new(client.clone()),
        );
        let overview = FeedPoller::spawn(
            FeedConfig::new(
                "overview",
                Duration::from_secs(config.overview_interval_secs),
            ),
            OverviewSource::new(client.clone()),
        );
        let prices = FeedPoller::spawn(
            FeedConfig::new("prices", Duration::from_secs(config.prices_interval_secs)),
            PriceBoardSource::new(client.clone(), config.price_path.clone(), memory),
        );
        let signal = FeedPoller::spawn(
            FeedConfig::new("signal", Duration::from_secs(config.signal_interval_secs)),
            SignalSource::new(client.clone(), config.signal_symbol.clone(), engine),
        );
        let open_trades = FeedPoller::spawn(
            FeedConfig::new("trades", Duration::from_secs(config.trades_interval_secs)),
            TradesSource::new(client),
        );

        Self::from_handles(exchanges, overview, prices, signal, open_trades)
    }

    /// Assemble a view state from already-spawned handles.
    pub fn from_handles(
        exchanges: FeedHandle<Vec<ExchangeStatus>>,
        overview: FeedHandle<MarketOverview>,
        prices: FeedHandle<Vec<SymbolPrice>>,
        signal: FeedHandle<SignalView>,
        open_trades: FeedHandle<Vec<OpenTrade>>,
    ) -> Self {
        Self {
            exchanges,
            overview,
            prices,
            signal,
            open_trades,
        }
    }

    /// Merge the latest snapshot of every feed into one immutable value.
    #[must_use]
    pub fn collect_snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            timestamp_ms: Utc::now().timestamp_millis(),
            exchanges: self.exchanges.snapshot().into(),
            overview: self.overview.snapshot().into(),
            prices: self.prices.snapshot().into(),
            signal: self.signal.snapshot().into(),
            open_trades: self.open_trades.snapshot().into(),
        }
    }

    /// Re-trigger every feed's fetch immediately.
    ///
    /// Subsequent scheduled ticks are unaffected; nothing is
    /// double-scheduled.
    pub fn refresh_all(&self) {
        info!("Manual refresh of all feeds");
        self.exchanges.force_refresh();
        self.overview.force_refresh();
        self.prices.force_refresh();
        self.signal.force_refresh();
        self.open_trades.force_refresh();
    }

    /// Cancel every feed. Idempotent.
    pub fn shutdown(&self) {
        self.exchanges.cancel();
        self.overview.cancel();
        self.prices.cancel();
        self.signal.cancel();
        self.open_trades.cancel();
    }

    /// Health summary of every feed, for logs and metrics.
    #[must_use]
    pub fn feed_health(&self) -> Vec<FeedHealth> {
        fn health<T: Clone>(handle: &FeedHandle<T>) -> FeedHealth {
            let snap = handle.snapshot();
            FeedHealth {
                id: handle.id().to_string(),
                state: snap.state,
                consecutive_misses: snap.consecutive_misses,
                data_age_secs: snap
                    .last_success_at
                    .map(|t| (Utc::now() - t).num_seconds()),
            }
        }

        vec![
            health(&self.exchanges),
            health(&self.overview),
            health(&self.prices),
            health(&self.signal),
            health(&self.open_trades),
        ]
    }
}
