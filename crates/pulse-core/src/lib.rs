//! Core domain types for the market pulse monitor.
//!
//! This crate provides fundamental types used throughout the system:
//! - `AnalysisRecord`: backend-owned analysis payload (consumed read-only)
//! - `Conclusion`, `Verdict`, `SignalCategory`: derived qualitative verdicts

pub mod analysis;
pub mod conclusion;

pub use analysis::{AnalysisRecord, DivergenceEntry, MarketStructure, TrendInfo};
pub use conclusion::{Conclusion, SignalCategory, Verdict};
