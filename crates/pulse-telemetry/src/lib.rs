//! Prometheus metrics and structured logging for the pulse monitor.
//!
//! - Per-feed gauges and counters for poll outcomes and data freshness
//! - Structured JSON logging with tracing

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::{render, Metrics};
