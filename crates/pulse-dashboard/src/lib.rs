//! Feed normalization and render-ready view state.
//!
//! Sits between the polling layer and presentation:
//!
//! ```text
//! PulseClient ──► normalizing FeedSource ──► FeedPoller task
//!                       │                        │
//!            PriceMemory / ConclusionEngine   watch channel
//!                                                │
//!                     ViewState::collect_snapshot ──► DashboardSnapshot
//! ```
//!
//! Each backend endpoint gets one normalizing source that extracts the
//! fields presentation needs at fetch time: the price source derives
//! per-symbol deltas through `PriceMemory`, the signal source collapses
//! each timeframe's analysis record through `ConclusionEngine`.
//! `ViewState` merges the latest snapshot of every feed into one
//! immutable, serializable `DashboardSnapshot` per render cycle.

pub mod sources;
pub mod state;
pub mod types;

pub use sources::{
    OverviewSource, PriceBoardSource, SignalSource, StatusSource, TradesSource,
};
pub use state::{ViewConfig, ViewState};
pub use types::{
    DashboardSnapshot, FeedHealth, FeedView, SignalView, SymbolPrice, TimeframeConclusion,
};
