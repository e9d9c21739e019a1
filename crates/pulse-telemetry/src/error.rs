//! Telemetry error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global tracing subscriber was already installed.
    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),

    /// Metric gathering or text encoding failed.
    #[error("Metrics encoding failed: {0}")]
    Metrics(String),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
