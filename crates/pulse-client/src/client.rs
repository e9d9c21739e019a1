//! HTTP client for the backend endpoints.

use crate::error::{ClientError, ClientResult};
use crate::types::{
    CompositeSignalResponse, ExchangeStatus, MarketOverview, OpenTrade, PriceBoard,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Exchange status endpoint.
pub const STATUS_PATH: &str = "/api/status/";
/// Market overview endpoint.
pub const MARKET_OVERVIEW_PATH: &str = "/api/market-overview/";
/// Default per-symbol price endpoint.
pub const DEFAULT_PRICE_PATH: &str = "/api/data/all/";
/// Alternate per-symbol price endpoint served by some deployments.
pub const PRICE_TICKER_PATH: &str = "/api/price-ticker/";
/// Composite signal endpoint.
pub const COMPOSITE_SIGNAL_PATH: &str = "/api/get-composite-signal/";
/// Open trades endpoint.
pub const OPEN_TRADES_PATH: &str = "/api/trades/open/";

/// Client for the trading-analytics backend REST API.
#[derive(Debug, Clone)]
pub struct PulseClient {
    /// HTTP client.
    client: Client,
    /// Base URL, without trailing slash.
    base_url: String,
}

impl PulseClient {
    /// Create a new client with the default request timeout.
    ///
    /// # Arguments
    /// * `base_url` - Backend origin (e.g. "http://127.0.0.1:8000")
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    /// GET a path and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Fetching");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = %status, "Backend returned failure status");
            return Err(ClientError::Upstream {
                status: format!("HTTP {status}"),
                message: body,
            });
        }

        response.json().await.map_err(ClientError::from_reqwest)
    }

    /// Fetch exchange reachability from `/api/status/`.
    pub async fn fetch_system_status(&self) -> ClientResult<Vec<ExchangeStatus>> {
        self.get_json(STATUS_PATH, &[]).await
    }

    /// Fetch global market metrics from `/api/market-overview/`.
    pub async fn fetch_market_overview(&self) -> ClientResult<MarketOverview> {
        self.get_json(MARKET_OVERVIEW_PATH, &[]).await
    }

    /// Fetch the per-symbol price board.
    ///
    /// # Arguments
    /// * `path` - Endpoint path; deployments serve either
    ///   [`DEFAULT_PRICE_PATH`] or [`PRICE_TICKER_PATH`].
    pub async fn fetch_price_board(&self, path: &str) -> ClientResult<PriceBoard> {
        self.get_json(path, &[]).await
    }

    /// Fetch the composite signal for one symbol.
    ///
    /// A response whose `status` is not SUCCESS/NEUTRAL is an upstream
    /// error: the body exists but the backend marked the run as failed.
    pub async fn fetch_composite_signal(
        &self,
        symbol: &str,
    ) -> ClientResult<CompositeSignalResponse> {
        let response: CompositeSignalResponse = self
            .get_json(COMPOSITE_SIGNAL_PATH, &[("symbol", symbol)])
            .await?;

        check_signal_status(response)
    }

    /// Fetch open positions from `/api/trades/open/`.
    pub async fn fetch_open_trades(&self) -> ClientResult<Vec<OpenTrade>> {
        self.get_json(OPEN_TRADES_PATH, &[]).await
    }
}

/// Reject composite responses whose `status` is not SUCCESS/NEUTRAL.
///
/// ERROR and unrecognized statuses become `Upstream`, carrying the
/// backend's own message when it supplied one.
fn check_signal_status(
    response: CompositeSignalResponse,
) -> ClientResult<CompositeSignalResponse> {
    if response.status.is_ok() {
        return Ok(response);
    }
    Err(ClientError::Upstream {
        status: response.status.to_string(),
        message: response
            .message
            .unwrap_or_else(|| "Composite signal run failed".to_string()),
    })
}
