//! Typed HTTP client for the trading-analytics backend.
//!
//! The backend computes all trend/divergence/market-structure analytics;
//! this crate only fetches and deserializes its JSON endpoints:
//!
//! - `/api/status/` - exchange reachability pings
//! - `/api/market-overview/` - global market metrics
//! - `/api/data/all/` (or `/api/price-ticker/`) - per-symbol prices
//! - `/api/get-composite-signal/?symbol=SYM` - composite analysis
//! - `/api/trades/open/` - open positions
//!
//! Responses are deserialized leniently: fields that arrive absent, null,
//! zero, or as `"N/A"` strings become `None` at this boundary so no
//! downstream code ever has to truthiness-check them.

pub mod client;
pub mod error;
pub mod types;

pub use client::{PulseClient, DEFAULT_PRICE_PATH, PRICE_TICKER_PATH};
pub use error::{ClientError, ClientResult};
pub use types::{
    CompositeSignalResponse, ExchangeHealth, ExchangeStatus, MarketOverview, OpenTrade,
    PriceBoard, SignalStatus, TickerEntry,
};
