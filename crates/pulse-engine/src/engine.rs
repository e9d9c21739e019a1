//! The conclusion engine.
//!
//! `derive` is a pure, total function: it never fails and always returns
//! exactly one `Conclusion`. Missing or malformed sub-fields degrade to
//! the next precedence tier instead of erroring.

use pulse_core::{AnalysisRecord, Conclusion, SignalCategory, Verdict};
use serde::{Deserialize, Serialize};

/// Divergence indicators in precedence order.
///
/// The backend emits divergences keyed by indicator name. Which indicator
/// wins when several report at once is a declared contract here, not an
/// artifact of JSON key order. Indicators absent from this list are
/// considered after it, in the order the backend sent them.
pub const DIVERGENCE_PRECEDENCE: &[&str] = &[
    "rsi",
    "macd",
    "stochastic",
    "cci",
    "mfi",
    "williams_r",
    "obv",
];

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Indicator precedence for divergence scanning.
    pub divergence_precedence: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            divergence_precedence: DIVERGENCE_PRECEDENCE
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

/// Derives a qualitative verdict from an analysis record.
#[derive(Debug, Clone, Default)]
pub struct ConclusionEngine {
    config: EngineConfig,
}

impl ConclusionEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Collapse an analysis record into one conclusion.
    ///
    /// Precedence, first match wins:
    /// 1. Divergence: the first indicator (precedence order, then
    ///    received order) with a non-empty entry list decides. Its
    ///    entries are scanned in order for a `type` containing
    ///    "bullish" or "bearish"; the first directional tag wins, so
    ///    entry order decides over tag kind when both appear.
    /// 2. Trend: `trend.signal` substring match, case-insensitive.
    ///    Any other non-empty label is Neutral evidence.
    /// 3. Market structure: predicted next-leg direction "up"/"down".
    /// 4. `{Neutral, None}`.
    #[must_use]
    pub fn derive(&self, record: &AnalysisRecord) -> Conclusion {
        if let Some(conclusion) = self.from_divergence(record) {
            return conclusion;
        }
        if let Some(conclusion) = Self::from_trend(record) {
            return conclusion;
        }
        if let Some(conclusion) = Self::from_market_structure(record) {
            return conclusion;
        }
        Conclusion::neutral()
    }

    /// Step 1: divergence scan.
    ///
    /// Only the first indicator with any entries is examined; if none of
    /// its entries carries a directional tag the whole divergence tier is
    /// exhausted and the caller falls through to trend.
    fn from_divergence(&self, record: &AnalysisRecord) -> Option<Conclusion> {
        let ranked = self
            .config
            .divergence_precedence
            .iter()
            .map(String::as_str);
        let unranked = record.divergence_indicators().filter(|name| {
            !self
                .config
                .divergence_precedence
                .iter()
                .any(|p| p == name)
        });

        for indicator in ranked.chain(unranked) {
            let entries = record.divergence_entries(indicator);
            if entries.is_empty() {
                continue;
            }
            for entry in &entries {
                let Some(kind) = entry.kind.as_deref() else {
                    continue;
                };
                let kind = kind.to_ascii_lowercase();
                if kind.contains("bullish") {
                    return Some(Conclusion::new(Verdict::Bullish, SignalCategory::Divergence));
                }
                if kind.contains("bearish") {
                    return Some(Conclusion::new(Verdict::Bearish, SignalCategory::Divergence));
                }
            }
            // First non-empty indicator had no directional tag.
            return None;
        }
        None
    }

    /// Step 2: trend label.
    fn from_trend(record: &AnalysisRecord) -> Option<Conclusion> {
        let signal = record.trend.signal.as_deref()?.trim();
        if signal.is_empty() {
            return None;
        }
        let lowered = signal.to_ascii_lowercase();
        let verdict = if lowered.contains("downtrend") {
            Verdict::Bearish
        } else if lowered.contains("uptrend") {
            Verdict::Bullish
        } else {
            Verdict::Neutral
        };
        Some(Conclusion::new(verdict, SignalCategory::Trend))
    }

    /// Step 3: predicted next-leg direction.
    fn from_market_structure(record: &AnalysisRecord) -> Option<Conclusion> {
        let direction = record
            .market_structure
            .predicted_next_leg_direction
            .as_deref()?;
        if direction.eq_ignore_ascii_case("up") {
            return Some(Conclusion::new(
                Verdict::Bullish,
                SignalCategory::MarketStructure,
            ));
        }
        if direction.eq_ignore_ascii_case("down") {
            return Some(Conclusion::new(
                Verdict::Bearish,
                SignalCategory::MarketStructure,
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> ConclusionEngine {
        ConclusionEngine::default()
    }

    fn record(value: serde_json::Value) -> AnalysisRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_bullish_divergence_beats_everything() {
        let record = record(json!({
            "trend": {"signal": "StrongConfirmedDowntrend"},
            "divergence": {"rsi": [{"type": "bullish_regular"}]},
            "market_structure": {"predicted_next_leg_direction": "down"},
        }));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bullish);
        assert_eq!(c.source, SignalCategory::Divergence);
    }

    #[test]
    fn test_bearish_hidden_divergence() {
        let record = record(json!({
            "divergence": {"macd": [{"type": "bearish_hidden"}]},
        }));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bearish);
        assert_eq!(c.source, SignalCategory::Divergence);
    }

    #[test]
    fn test_divergence_precedence_list_wins_over_received_order() {
        // Backend sent obv first, but rsi outranks it.
        let record = record(json!({
            "divergence": {
                "obv": [{"type": "bearish_regular"}],
                "rsi": [{"type": "bullish_regular"}]
            },
        }));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bullish);
    }

    #[test]
    fn test_unranked_indicator_used_in_received_order() {
        let record = record(json!({
            "divergence": {
                "whale": [{"type": "bullish_regular"}],
                "zigzag": [{"type": "bearish_regular"}]
            },
        }));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bullish);
        assert_eq!(c.source, SignalCategory::Divergence);
    }

    #[test]
    fn test_entries_scanned_in_order() {
        let record = record(json!({
            "divergence": {"rsi": [
                {"type": "bearish_regular"},
                {"type": "bullish_hidden"}
            ]},
        }));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bearish);
    }

    #[test]
    fn test_empty_divergence_falls_to_trend() {
        let record = record(json!({
            "divergence": {},
            "trend": {"signal": "downtrend"},
        }));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bearish);
        assert_eq!(c.source, SignalCategory::Trend);
    }

    #[test]
    fn test_untagged_divergence_falls_to_trend() {
        // rsi has entries but none with a directional tag; the
        // divergence tier yields nothing and trend decides.
        let record = record(json!({
            "divergence": {"rsi": [{"index": 42}]},
            "trend": {"signal": "StrongConfirmedUptrend"},
        }));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bullish);
        assert_eq!(c.source, SignalCategory::Trend);
    }

    #[test]
    fn test_trend_uptrend_case_insensitive() {
        let record = record(json!({"trend": {"signal": "StrongConfirmedUptrend"}}));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bullish);
        assert_eq!(c.source, SignalCategory::Trend);
    }

    #[test]
    fn test_trend_other_label_is_neutral_evidence() {
        let record = record(json!({
            "trend": {"signal": "SidewaysLowVol"},
            "market_structure": {"predicted_next_leg_direction": "up"},
        }));
        // A non-empty trend label still decides; structure is not reached.
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Neutral);
        assert_eq!(c.source, SignalCategory::Trend);
    }

    #[test]
    fn test_blank_trend_signal_is_no_evidence() {
        let record = record(json!({
            "trend": {"signal": "  "},
            "market_structure": {"predicted_next_leg_direction": "down"},
        }));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bearish);
        assert_eq!(c.source, SignalCategory::MarketStructure);
    }

    #[test]
    fn test_market_structure_up() {
        let record = record(json!({
            "market_structure": {"predicted_next_leg_direction": "up"},
        }));
        let c = engine().derive(&record);
        assert_eq!(c.verdict, Verdict::Bullish);
        assert_eq!(c.source, SignalCategory::MarketStructure);
    }

    #[test]
    fn test_market_structure_unknown_direction() {
        let record = record(json!({
            "market_structure": {"predicted_next_leg_direction": "sideways"},
        }));
        let c = engine().derive(&record);
        assert_eq!(c, Conclusion::neutral());
    }

    #[test]
    fn test_empty_record_is_neutral_none() {
        let c = engine().derive(&AnalysisRecord::default());
        assert_eq!(c.verdict, Verdict::Neutral);
        assert_eq!(c.source, SignalCategory::None);
    }

    #[test]
    fn test_custom_precedence() {
        let engine = ConclusionEngine::new(EngineConfig {
            divergence_precedence: vec!["obv".to_string(), "rsi".to_string()],
        });
        let record = record(json!({
            "divergence": {
                "rsi": [{"type": "bullish_regular"}],
                "obv": [{"type": "bearish_regular"}]
            },
        }));
        assert_eq!(engine.derive(&record).verdict, Verdict::Bearish);
    }
}
