//! Live dashboard monitor for the trading-analytics backend.
//!
//! Composition root that wires everything together:
//! - Typed HTTP client against the backend's JSON endpoints
//! - One polling feed per endpoint
//! - Price memory and the conclusion engine for derived values
//! - Periodic snapshot logging and metrics

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
