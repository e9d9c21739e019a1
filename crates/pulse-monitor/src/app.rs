//! Main application orchestration.
//!
//! Wires the HTTP client, the five polling feeds, price memory, and the
//! conclusion engine, then logs the merged snapshot on a fixed cadence
//! until shutdown.

use crate::config::AppConfig;
use crate::error::AppResult;
use pulse_client::{ExchangeHealth, PulseClient};
use pulse_dashboard::{DashboardSnapshot, ViewState};
use pulse_engine::ConclusionEngine;
use pulse_feed::{FeedState, PriceMemory, PriceMemoryHandle};
use pulse_telemetry::Metrics;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main application.
pub struct Application {
    config: AppConfig,
    view: ViewState,
    memory: PriceMemoryHandle,
}

impl Application {
    /// Create the application and spawn its feed pollers.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = PulseClient::with_timeout(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let memory = PriceMemory::new_shared();
        let engine = ConclusionEngine::new(config.engine.clone());

        let view = ViewState::spawn(client, Arc::clone(&memory), engine, &config.feeds);

        Ok(Self {
            config,
            view,
            memory,
        })
    }

    /// Run until a shutdown signal arrives.
    pub async fn run(self) -> AppResult<()> {
        info!(
            base_url = %self.config.base_url,
            log_interval_secs = self.config.snapshot_log_interval_secs,
            "Entering main loop"
        );

        let mut ticker = tokio::time::interval(Duration::from_secs(
            self.config.snapshot_log_interval_secs,
        ));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.report_snapshot();
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        self.view.shutdown();

        match pulse_telemetry::render() {
            Ok(text) => debug!(metrics = %text, "Final metrics"),
            Err(e) => warn!(error = %e, "Failed to render final metrics"),
        }

        info!("Shut down");
        Ok(())
    }

    /// Collect, log, and record one merged snapshot.
    fn report_snapshot(&self) {
        let snapshot = self.view.collect_snapshot();
        Metrics::snapshot_collected();

        for health in self.view.feed_health() {
            Metrics::feed_health(
                &health.id,
                health.state,
                health.consecutive_misses,
                health.data_age_secs,
            );
        }
        Metrics::price_symbols(self.memory.symbol_count());

        log_summary(&snapshot);

        match serde_json::to_string(&snapshot) {
            Ok(json) => debug!(snapshot = %json, "Dashboard snapshot"),
            Err(e) => warn!(error = %e, "Failed to serialize snapshot"),
        }
    }
}

fn log_summary(snapshot: &DashboardSnapshot) {
    let exchanges_online = snapshot
        .exchanges
        .data
        .as_deref()
        .map(|statuses| {
            statuses
                .iter()
                .filter(|s| s.status == ExchangeHealth::Online)
                .count()
        })
        .unwrap_or(0);
    let price_rows = snapshot.prices.data.as_deref().map_or(0, <[_]>::len);
    let open_trades = snapshot.open_trades.data.as_deref().map_or(0, <[_]>::len);

    let verdicts: Vec<String> = snapshot
        .signal
        .data
        .as_ref()
        .map(|signal| {
            signal
                .conclusions
                .iter()
                .map(|c| format!("{}={}", c.timeframe, c.conclusion.verdict))
                .collect()
        })
        .unwrap_or_default();

    info!(
        exchanges_online,
        price_rows,
        open_trades,
        signal_state = ?snapshot.signal.state,
        verdicts = ?verdicts,
        "Snapshot collected"
    );

    for (id, state, error) in [
        ("status", snapshot.exchanges.state, &snapshot.exchanges.last_error),
        ("overview", snapshot.overview.state, &snapshot.overview.last_error),
        ("prices", snapshot.prices.state, &snapshot.prices.last_error),
        ("signal", snapshot.signal.state, &snapshot.signal.last_error),
        ("trades", snapshot.open_trades.state, &snapshot.open_trades.last_error),
    ] {
        if matches!(state, FeedState::Error | FeedState::Stale) {
            warn!(feed = id, state = ?state, error = ?error, "Feed degraded");
        }
    }
}
