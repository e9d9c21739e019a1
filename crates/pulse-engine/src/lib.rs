//! Conclusion derivation from backend analysis records.
//!
//! Collapses a nested, partially-populated `AnalysisRecord` into one
//! qualitative `Conclusion` using a fixed precedence of signal
//! categories: divergence > trend > market structure > none.

pub mod engine;

pub use engine::{ConclusionEngine, EngineConfig, DIVERGENCE_PRECEDENCE};
