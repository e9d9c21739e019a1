//! The generic feed poller task.
//!
//! One tokio task per feed, strictly periodic, no backoff and no
//! jitter. Retries are implicit via the next scheduled tick. The fetch
//! is awaited inline in the task, so at most one request per feed is
//! ever in flight.

use crate::error::FeedResult;
use crate::state::FeedSnapshot;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One remote data source.
///
/// The poller is generic over the source, which is the test seam: HTTP
/// normalizers in production, scripted stubs in tests.
pub trait FeedSource: Send + Sync + 'static {
    /// Payload produced by a successful fetch.
    type Output: Clone + Send + Sync + 'static;

    /// Fetch one payload.
    fn fetch(&self) -> impl Future<Output = FeedResult<Self::Output>> + Send;
}

/// Per-feed scheduling configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Feed identifier used in logs and metrics labels.
    pub id: String,
    /// Fixed polling interval.
    pub interval: Duration,
}

impl FeedConfig {
    /// Create a feed configuration.
    pub fn new(id: impl Into<String>, interval: Duration) -> Self {
        Self {
            id: id.into(),
            interval,
        }
    }
}

/// Handle to a running feed poller.
///
/// Dropping the handle does not stop the task; `cancel` is the only
/// teardown path and is idempotent.
#[derive(Debug, Clone)]
pub struct FeedHandle<T> {
    id: String,
    rx: watch::Receiver<FeedSnapshot<T>>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
}

impl<T: Clone> FeedHandle<T> {
    /// Feed identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current snapshot of the feed.
    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot<T> {
        self.rx.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot<T>> {
        self.rx.clone()
    }

    /// Trigger an immediate fetch without waiting for the next tick.
    ///
    /// The periodic schedule is not shifted: the next regular tick
    /// fires exactly when it would have anyway.
    pub fn force_refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop the poller. Idempotent.
    ///
    /// An in-flight request is not aborted, but its response is
    /// discarded: no state transition lands after cancellation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the poller has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Spawns feed poller tasks.
pub struct FeedPoller;

impl FeedPoller {
    /// Spawn a poller for one source.
    ///
    /// The first fetch happens immediately; subsequent fetches follow
    /// the configured interval.
    pub fn spawn<S: FeedSource>(config: FeedConfig, source: S) -> FeedHandle<S::Output> {
        let (tx, rx) = watch::channel(FeedSnapshot::idle());
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let id = config.id.clone();
        tokio::spawn(poll_loop(
            config,
            source,
            tx,
            Arc::clone(&refresh),
            cancel.clone(),
        ));

        FeedHandle {
            id,
            rx,
            refresh,
            cancel,
        }
    }
}

async fn poll_loop<S: FeedSource>(
    config: FeedConfig,
    source: S,
    tx: watch::Sender<FeedSnapshot<S::Output>>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(config.interval);
    // A slow fetch skips the ticks that elapsed under it instead of
    // bursting to catch up.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            _ = refresh.notified() => {
                debug!(feed = %config.id, "Forced refresh");
            }
        }

        tx.send_modify(FeedSnapshot::mark_loading);

        // Race the fetch against cancellation: a late-arriving response
        // must never be applied once the feed is cancelled.
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = source.fetch() => result,
        };

        match result {
            Ok(data) => {
                debug!(feed = %config.id, "Fetch succeeded");
                tx.send_modify(|snap| snap.record_success(data));
            }
            Err(e) => {
                let snapshot_after = {
                    tx.send_modify(|snap| snap.record_failure(e.to_string()));
                    tx.borrow().state
                };
                warn!(
                    feed = %config.id,
                    error = %e,
                    state = ?snapshot_after,
                    "Fetch failed, keeping last good data"
                );
            }
        }
    }

    debug!(feed = %config.id, "Feed poller stopped");
}
