//! Backend analysis record types.
//!
//! The analysis record is owned by the remote backend and consumed
//! read-only. Any field may be absent, null, or empty; absence means
//! "no evidence", never an error, so every field is lenient on
//! deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserialize a field treating JSON `null` the same as absence.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Trend classification for one symbol/timeframe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendInfo {
    /// Trend label, e.g. "StrongConfirmedUptrend", "SidewaysLowVol".
    #[serde(default)]
    pub signal: Option<String>,
    /// ADX value at the last bar.
    #[serde(default)]
    pub adx: Option<f64>,
    /// EMA slope angle in degrees at the last bar.
    #[serde(default)]
    pub slope: Option<f64>,
}

/// Swing/pivot classification of recent price action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketStructure {
    /// Phase label, e.g. "ranging", "weak_trend", "strong_trend".
    #[serde(default)]
    pub market_phase: Option<String>,
    /// Predicted direction of the next leg: "up" or "down".
    #[serde(default)]
    pub predicted_next_leg_direction: Option<String>,
    /// Detected pivot points (opaque to this client).
    #[serde(default, deserialize_with = "null_as_default")]
    pub pivots: Vec<Value>,
    /// Detected anomalies (opaque to this client).
    #[serde(default, deserialize_with = "null_as_default")]
    pub anomalies: Vec<Value>,
}

/// One divergence occurrence reported by the backend.
///
/// The `type` tag carries the direction, e.g. "bullish_regular",
/// "bearish_hidden". Unknown extra fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DivergenceEntry {
    /// Direction tag. None when the entry is malformed.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Per symbol x timeframe analysis payload.
///
/// The divergence map is kept as a `serde_json::Map` so the key order the
/// backend emitted survives deserialization (preserve_order).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Trend classification.
    #[serde(default, deserialize_with = "null_as_default")]
    pub trend: TrendInfo,
    /// Divergences keyed by indicator name ("rsi", "macd", ...), each a
    /// list of occurrences.
    #[serde(default, deserialize_with = "null_as_default")]
    pub divergence: serde_json::Map<String, Value>,
    /// Market structure classification.
    #[serde(default, deserialize_with = "null_as_default")]
    pub market_structure: MarketStructure,
    /// Candlestick pattern names.
    #[serde(default, deserialize_with = "null_as_default")]
    pub patterns: Vec<String>,
}

impl AnalysisRecord {
    /// Divergence entries for one indicator, in the order received.
    ///
    /// A missing indicator, a non-array value, or a malformed entry all
    /// degrade to "no evidence" rather than an error.
    #[must_use]
    pub fn divergence_entries(&self, indicator: &str) -> Vec<DivergenceEntry> {
        let Some(Value::Array(entries)) = self.divergence.get(indicator) else {
            return Vec::new();
        };
        entries
            .iter()
            .map(|v| serde_json::from_value(v.clone()).unwrap_or_default())
            .collect()
    }

    /// Indicator names present in the record, in the order received.
    pub fn divergence_indicators(&self) -> impl Iterator<Item = &str> {
        self.divergence.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_parses() {
        let record: AnalysisRecord = serde_json::from_value(json!({})).unwrap();
        assert!(record.trend.signal.is_none());
        assert!(record.divergence.is_empty());
        assert!(record.market_structure.predicted_next_leg_direction.is_none());
        assert!(record.patterns.is_empty());
    }

    #[test]
    fn test_null_fields_parse_as_empty() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "trend": null,
            "divergence": null,
            "market_structure": null,
            "patterns": null,
        }))
        .unwrap();
        assert!(record.divergence.is_empty());
        assert!(record.patterns.is_empty());
    }

    #[test]
    fn test_partial_record() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "trend": {"signal": "StrongConfirmedUptrend", "adx": 31.2},
            "market_structure": {"market_phase": "ranging"},
        }))
        .unwrap();
        assert_eq!(
            record.trend.signal.as_deref(),
            Some("StrongConfirmedUptrend")
        );
        assert_eq!(record.trend.adx, Some(31.2));
        assert!(record.trend.slope.is_none());
        assert_eq!(
            record.market_structure.market_phase.as_deref(),
            Some("ranging")
        );
    }

    #[test]
    fn test_divergence_entries_in_order() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "divergence": {
                "rsi": [
                    {"type": "bearish_regular", "index": 120},
                    {"type": "bullish_hidden", "index": 131}
                ]
            }
        }))
        .unwrap();
        let entries = record.divergence_entries("rsi");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind.as_deref(), Some("bearish_regular"));
        assert_eq!(entries[1].kind.as_deref(), Some("bullish_hidden"));
    }

    #[test]
    fn test_divergence_entries_malformed() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "divergence": {
                "rsi": "garbage",
                "macd": [{"index": 5}, 42]
            }
        }))
        .unwrap();
        assert!(record.divergence_entries("rsi").is_empty());
        let macd = record.divergence_entries("macd");
        assert_eq!(macd.len(), 2);
        assert!(macd[0].kind.is_none());
        assert!(macd[1].kind.is_none());
        assert!(record.divergence_entries("obv").is_empty());
    }

    #[test]
    fn test_indicator_order_preserved() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "divergence": {"zigzag": [], "whale": [], "atr": []}
        }))
        .unwrap();
        let names: Vec<&str> = record.divergence_indicators().collect();
        assert_eq!(names, vec!["zigzag", "whale", "atr"]);
    }
}
