//! Prometheus metrics for the pulse monitor.
//!
//! Observability over the polling layer:
//! - Per-feed lifecycle state
//! - Fetch outcomes
//! - Data freshness
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should cause an immediate crash at startup rather than silent failure.
//! These panics only occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_gauge_vec, register_int_counter, register_int_gauge, GaugeVec, IntCounter, IntGauge,
    TextEncoder,
};
use pulse_feed::FeedState;

use crate::error::{TelemetryError, TelemetryResult};

const FEED_STATES: [&str; 5] = ["idle", "loading", "success", "error", "stale"];

/// Per-feed lifecycle state (1 = active, 0 = inactive).
/// Labels: feed, state (idle/loading/success/error/stale)
pub static FEED_STATE: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "pulse_feed_state",
        "Feed lifecycle state (1=active, 0=inactive)",
        &["feed", "state"]
    )
    .unwrap()
});

/// Failed fetches since the last success.
pub static FEED_CONSECUTIVE_MISSES: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "pulse_feed_consecutive_misses",
        "Failed fetches since the last successful one",
        &["feed"]
    )
    .unwrap()
});

/// Seconds since the last successful fetch.
pub static FEED_DATA_AGE_SECONDS: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "pulse_feed_data_age_seconds",
        "Seconds since the feed last fetched successfully",
        &["feed"]
    )
    .unwrap()
});

/// Symbols currently tracked in price memory.
pub static PRICE_SYMBOLS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "pulse_price_symbols",
        "Symbols currently tracked in price memory"
    )
    .unwrap()
});

/// Total dashboard snapshots collected.
pub static SNAPSHOTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pulse_snapshots_total",
        "Total dashboard snapshots collected"
    )
    .unwrap()
});

/// Metrics helper for recording pulse events.
pub struct Metrics;

impl Metrics {
    /// Set a feed's lifecycle state.
    /// Only the active state is set to 1, all others to 0.
    pub fn feed_state_set(feed: &str, state: FeedState) {
        let active = match state {
            FeedState::Idle => "idle",
            FeedState::Loading => "loading",
            FeedState::Success => "success",
            FeedState::Error => "error",
            FeedState::Stale => "stale",
        };
        for s in &FEED_STATES {
            FEED_STATE.with_label_values(&[feed, s]).set(0.0);
        }
        FEED_STATE.with_label_values(&[feed, active]).set(1.0);
    }

    /// Record one feed's health summary.
    pub fn feed_health(feed: &str, state: FeedState, consecutive_misses: u32, age_secs: Option<i64>) {
        Self::feed_state_set(feed, state);
        FEED_CONSECUTIVE_MISSES
            .with_label_values(&[feed])
            .set(f64::from(consecutive_misses));
        if let Some(age) = age_secs {
            FEED_DATA_AGE_SECONDS
                .with_label_values(&[feed])
                .set(age as f64);
        }
    }

    /// Set the number of tracked price symbols.
    pub fn price_symbols(count: usize) {
        PRICE_SYMBOLS.set(count as i64);
    }

    /// Record one collected dashboard snapshot.
    pub fn snapshot_collected() {
        SNAPSHOTS_TOTAL.inc();
    }
}

/// Render all registered metrics in Prometheus text exposition format.
pub fn render() -> TelemetryResult<String> {
    let encoder = TextEncoder::new();
    encoder
        .encode_to_string(&prometheus::gather())
        .map_err(|e| TelemetryError::Metrics(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_state_set_is_exclusive() {
        Metrics::feed_state_set("status", FeedState::Success);
        assert_eq!(
            FEED_STATE.with_label_values(&["status", "success"]).get(),
            1.0
        );
        assert_eq!(
            FEED_STATE.with_label_values(&["status", "error"]).get(),
            0.0
        );

        Metrics::feed_state_set("status", FeedState::Stale);
        assert_eq!(
            FEED_STATE.with_label_values(&["status", "success"]).get(),
            0.0
        );
        assert_eq!(
            FEED_STATE.with_label_values(&["status", "stale"]).get(),
            1.0
        );
    }

    #[test]
    fn test_feed_health_records_misses_and_age() {
        Metrics::feed_health("signal", FeedState::Error, 2, Some(45));
        assert_eq!(
            FEED_CONSECUTIVE_MISSES.with_label_values(&["signal"]).get(),
            2.0
        );
        assert_eq!(
            FEED_DATA_AGE_SECONDS.with_label_values(&["signal"]).get(),
            45.0
        );
    }

    #[test]
    fn test_render_exposition() {
        Metrics::snapshot_collected();
        let text = render().unwrap();
        assert!(text.contains("pulse_snapshots_total"));
    }
}
