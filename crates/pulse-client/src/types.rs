//! Backend response payload types.
//!
//! The backend's JSON is heterogeneous: the same field may arrive as a
//! number, a string, zero, `"N/A"`, null, or not at all. Each of those
//! shapes is folded into an explicit `Option` by the deserializers here,
//! so the Neutral/None fallback paths downstream stay exhaustive.

use pulse_core::AnalysisRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Deserialize a field treating JSON `null` the same as absence.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a numeric metric where zero, `"N/A"`, empty strings, and
/// null all mean "not yet available".
fn de_opt_metric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| *v != 0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
                None
            } else {
                s.parse::<f64>().ok().filter(|v| *v != 0.0)
            }
        }
        _ => None,
    })
}

/// Deserialize a display label where `"N/A"`, empty strings, and null
/// mean "not yet available". Numbers are kept as their string form.
fn de_opt_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
                None
            } else {
                Some(s.to_string())
            }
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Reachability of one upstream exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeHealth {
    Online,
    Offline,
    /// Any status string this client does not recognize.
    #[serde(other)]
    Unknown,
}

/// One entry of the `/api/status/` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeStatus {
    /// Exchange name (e.g. "Kucoin", "OKX").
    pub name: String,
    /// Reachability.
    pub status: ExchangeHealth,
    /// Free-form latency string: "12.3ms", "Err 502", "---".
    #[serde(default, deserialize_with = "de_opt_label")]
    pub ping: Option<String>,
}

/// Global market metrics from `/api/market-overview/`.
///
/// The backend serves zeros/`"N/A"` placeholders until its own fetchers
/// have data; those all deserialize to `None` here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    /// Total market capitalization in USD.
    #[serde(default, deserialize_with = "de_opt_metric")]
    pub market_cap: Option<f64>,
    /// 24h traded volume in USD.
    #[serde(default, deserialize_with = "de_opt_metric")]
    pub volume_24h: Option<f64>,
    /// BTC dominance percentage.
    #[serde(default, deserialize_with = "de_opt_metric")]
    pub btc_dominance: Option<f64>,
    /// Fear & greed label or index.
    #[serde(default, deserialize_with = "de_opt_label")]
    pub fear_and_greed: Option<String>,
}

/// Per-symbol ticker entry from the price feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerEntry {
    /// Last traded price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// 24h change percentage, when the upstream supplies it.
    #[serde(default)]
    pub change_24h: Option<Decimal>,
    /// Which exchange the quote came from.
    #[serde(default)]
    pub source: Option<String>,
}

/// Symbol -> ticker map from `/api/data/all/`.
pub type PriceBoard = BTreeMap<String, TickerEntry>;

/// Composite signal status reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "ERROR")]
    Error,
    /// A status value this client does not recognize. Treated like
    /// `Error` so protocol drift surfaces instead of rendering as a
    /// silent Neutral.
    #[serde(other)]
    Unknown,
}

impl SignalStatus {
    /// Whether the response body is usable.
    #[must_use]
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Success | Self::Neutral)
    }
}

impl std::fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Error => write!(f, "ERROR"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Response of `/api/get-composite-signal/?symbol=SYM`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeSignalResponse {
    /// Outcome of the backend's signal run.
    pub status: SignalStatus,
    /// Human-readable explanation (usually present on NEUTRAL/ERROR).
    #[serde(default)]
    pub message: Option<String>,
    /// Selected trade signal (opaque to this client).
    #[serde(default)]
    pub signal: Option<Value>,
    /// Per-strategy scores (opaque to this client).
    #[serde(default)]
    pub scores: Option<Value>,
    /// Analysis records per timeframe ("15m", "1h", "4h", ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_analysis_details: BTreeMap<String, AnalysisRecord>,
}

/// One open position from `/api/trades/open/`.
///
/// Consumed and displayed only; never analyzed by this client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenTrade {
    /// Backend trade id.
    #[serde(default)]
    pub id: Option<String>,
    /// Traded symbol.
    #[serde(default)]
    pub symbol: String,
    /// Backend status label (e.g. "OPEN").
    #[serde(default)]
    pub status: Option<String>,
    /// Entry price.
    #[serde(default)]
    pub entry_price: Option<Decimal>,
    /// ISO-8601 open timestamp as emitted by the backend.
    #[serde(default)]
    pub opened_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_exchange_status_parse() {
        let raw = json!([
            {"name": "Kucoin", "status": "online", "ping": "41.7ms"},
            {"name": "OKX", "status": "offline", "ping": "---"},
            {"name": "XT.com", "status": "degraded", "ping": null}
        ]);
        let statuses: Vec<ExchangeStatus> = serde_json::from_value(raw).unwrap();
        assert_eq!(statuses[0].status, ExchangeHealth::Online);
        assert_eq!(statuses[0].ping.as_deref(), Some("41.7ms"));
        assert_eq!(statuses[1].status, ExchangeHealth::Offline);
        assert_eq!(statuses[2].status, ExchangeHealth::Unknown);
        assert!(statuses[2].ping.is_none());
    }

    #[test]
    fn test_market_overview_placeholders_become_none() {
        let raw = json!({
            "market_cap": 0,
            "volume_24h": "N/A",
            "fear_and_greed": "N/A"
        });
        let overview: MarketOverview = serde_json::from_value(raw).unwrap();
        assert!(overview.market_cap.is_none());
        assert!(overview.volume_24h.is_none());
        assert!(overview.btc_dominance.is_none());
        assert!(overview.fear_and_greed.is_none());
    }

    #[test]
    fn test_market_overview_populated() {
        let raw = json!({
            "market_cap": 2.41e12,
            "volume_24h": "98500000000",
            "btc_dominance": 54.2,
            "fear_and_greed": 72
        });
        let overview: MarketOverview = serde_json::from_value(raw).unwrap();
        assert_eq!(overview.market_cap, Some(2.41e12));
        assert_eq!(overview.volume_24h, Some(98_500_000_000.0));
        assert_eq!(overview.btc_dominance, Some(54.2));
        assert_eq!(overview.fear_and_greed.as_deref(), Some("72"));
    }

    #[test]
    fn test_price_board_parse() {
        let raw = json!({
            "BTC-USDT": {"price": "64250.5", "change_24h": "1.84", "source": "Kucoin"},
            "ETH-USDT": {"price": 3100.25}
        });
        let board: PriceBoard = serde_json::from_value(raw).unwrap();
        let btc = &board["BTC-USDT"];
        assert_eq!(btc.price, Some(dec!(64250.5)));
        assert_eq!(btc.change_24h, Some(dec!(1.84)));
        assert_eq!(btc.source.as_deref(), Some("Kucoin"));
        let eth = &board["ETH-USDT"];
        assert_eq!(eth.price, Some(dec!(3100.25)));
        assert!(eth.change_24h.is_none());
    }

    #[test]
    fn test_composite_signal_parse() {
        let raw = json!({
            "status": "SUCCESS",
            "signal": {"strategy_name": "DivergenceSniper"},
            "full_analysis_details": {
                "1h": {"trend": {"signal": "StrongConfirmedUptrend"}},
                "4h": {}
            }
        });
        let resp: CompositeSignalResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.status, SignalStatus::Success);
        assert!(resp.status.is_ok());
        assert_eq!(resp.full_analysis_details.len(), 2);
        assert_eq!(
            resp.full_analysis_details["1h"].trend.signal.as_deref(),
            Some("StrongConfirmedUptrend")
        );
    }

    #[test]
    fn test_composite_signal_unknown_status() {
        let raw = json!({"status": "PENDING"});
        let resp: CompositeSignalResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.status, SignalStatus::Unknown);
        assert!(!resp.status.is_ok());
    }

    #[test]
    fn test_open_trade_parse() {
        let raw = json!([{
            "id": "17",
            "symbol": "BTC-USDT",
            "status": "OPEN",
            "entry_price": 64100.0,
            "opened_at": "2026-08-01T09:30:00+00:00",
            "notes": "ignored extra field"
        }]);
        let trades: Vec<OpenTrade> = serde_json::from_value(raw).unwrap();
        assert_eq!(trades[0].symbol, "BTC-USDT");
        assert_eq!(trades[0].entry_price, Some(dec!(64100.0)));
    }
}
