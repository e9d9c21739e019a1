//! Normalizing feed sources.
//!
//! One `FeedSource` per backend endpoint. Each fetch extracts exactly
//! the fields downstream needs; derived values (price deltas,
//! conclusions) are computed here, once per successful poll - computing
//! them at render time would advance the price baseline once per frame
//! instead of once per observation.

use crate::types::{SignalView, SymbolPrice, TimeframeConclusion};
use pulse_client::{
    CompositeSignalResponse, ExchangeStatus, MarketOverview, OpenTrade, PriceBoard, PulseClient,
};
use pulse_engine::ConclusionEngine;
use pulse_feed::{FeedResult, FeedSource, PriceMemory, PriceMemoryHandle};
use tracing::debug;

/// Source for `/api/status/`.
pub struct StatusSource {
    client: PulseClient,
}

impl StatusSource {
    pub fn new(client: PulseClient) -> Self {
        Self { client }
    }
}

impl FeedSource for StatusSource {
    type Output = Vec<ExchangeStatus>;

    async fn fetch(&self) -> FeedResult<Self::Output> {
        Ok(self.client.fetch_system_status().await?)
    }
}

/// Source for `/api/market-overview/`.
pub struct OverviewSource {
    client: PulseClient,
}

impl OverviewSource {
    pub fn new(client: PulseClient) -> Self {
        Self { client }
    }
}

impl FeedSource for OverviewSource {
    type Output = MarketOverview;

    async fn fetch(&self) -> FeedResult<Self::Output> {
        Ok(self.client.fetch_market_overview().await?)
    }
}

/// Source for the per-symbol price board.
///
/// Records every observed price in `PriceMemory` and fills
/// `change_percent` from the upstream `change_24h` when present,
/// otherwise from the derived period-over-period delta.
pub struct PriceBoardSource {
    client: PulseClient,
    path: String,
    memory: PriceMemoryHandle,
}

impl PriceBoardSource {
    pub fn new(client: PulseClient, path: impl Into<String>, memory: PriceMemoryHandle) -> Self {
        Self {
            client,
            path: path.into(),
            memory,
        }
    }
}

impl FeedSource for PriceBoardSource {
    type Output = Vec<SymbolPrice>;

    async fn fetch(&self) -> FeedResult<Self::Output> {
        let board = self.client.fetch_price_board(&self.path).await?;
        Ok(normalize_price_board(board, &self.memory))
    }
}

/// Source for `/api/get-composite-signal/`.
///
/// Runs the conclusion engine over every timeframe's analysis record at
/// fetch time.
pub struct SignalSource {
    client: PulseClient,
    symbol: String,
    engine: ConclusionEngine,
}

impl SignalSource {
    pub fn new(client: PulseClient, symbol: impl Into<String>, engine: ConclusionEngine) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            engine,
        }
    }
}

impl FeedSource for SignalSource {
    type Output = SignalView;

    async fn fetch(&self) -> FeedResult<Self::Output> {
        let response = self.client.fetch_composite_signal(&self.symbol).await?;
        Ok(normalize_signal(&self.symbol, response, &self.engine))
    }
}

/// Source for `/api/trades/open/`.
pub struct TradesSource {
    client: PulseClient,
}

impl TradesSource {
    pub fn new(client: PulseClient) -> Self {
        Self { client }
    }
}

impl FeedSource for TradesSource {
    type Output = Vec<OpenTrade>;

    async fn fetch(&self) -> FeedResult<Self::Output> {
        Ok(self.client.fetch_open_trades().await?)
    }
}

/// Normalize a raw price board into symbol rows.
///
/// Every priced symbol is recorded in memory so the baseline stays one
/// observation behind, even while the upstream supplies `change_24h`.
/// Unpriced symbols are dropped.
pub(crate) fn normalize_price_board(
    board: PriceBoard,
    memory: &PriceMemory,
) -> Vec<SymbolPrice> {
    let mut rows = Vec::with_capacity(board.len());
    for (symbol, entry) in board {
        let Some(price) = entry.price else {
            debug!(symbol = %symbol, "Dropping ticker entry without a price");
            continue;
        };

        let tick = memory.update(&symbol, price);
        let (change_percent, change_is_derived) = match entry.change_24h {
            Some(change) => (change.round_dp(2), false),
            None => (tick.change_percent, true),
        };

        rows.push(SymbolPrice {
            symbol,
            price,
            change_percent,
            source: entry.source,
            change_is_derived,
        });
    }
    rows
}

/// Normalize a composite signal response into a view.
pub(crate) fn normalize_signal(
    symbol: &str,
    response: CompositeSignalResponse,
    engine: &ConclusionEngine,
) -> SignalView {
    let conclusions = response
        .full_analysis_details
        .into_iter()
        .map(|(timeframe, record)| TimeframeConclusion {
            conclusion: engine.derive(&record),
            patterns: record.patterns,
            timeframe,
        })
        .collect();

    SignalView {
        symbol: symbol.to_string(),
        status: response.status,
        message: response.message,
        conclusions,
    }
}
