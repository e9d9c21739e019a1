//! Generic per-feed polling scheduler and price memory.
//!
//! Each remote data source gets one `FeedPoller` task with its own fixed
//! interval and an independent Idle/Loading/Success/Error/Stale
//! lifecycle. Snapshots are published through a `watch` channel; the
//! composition root merges them instead of sharing mutable state.
//!
//! `PriceMemory` keeps the last observed price per symbol so the price
//! feed can derive period-over-period deltas when the upstream payload
//! omits `change_24h`.

pub mod error;
pub mod poller;
pub mod price_memory;
pub mod state;

pub use error::{FeedError, FeedResult};
pub use poller::{FeedConfig, FeedHandle, FeedPoller, FeedSource};
pub use price_memory::{PriceMemory, PriceMemoryHandle, PriceTick};
pub use state::{FeedSnapshot, FeedState, STALE_MISS_THRESHOLD};
