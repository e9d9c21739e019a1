//! Qualitative verdict types derived from analysis records.

use serde::{Deserialize, Serialize};

/// Qualitative market verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Evidence points upward.
    Bullish,
    /// Evidence points downward.
    Bearish,
    /// No directional evidence, or conflicting evidence.
    Neutral,
}

impl Verdict {
    /// Returns the opposite verdict. Neutral has no opposite.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Bullish => Self::Bearish,
            Self::Bearish => Self::Bullish,
            Self::Neutral => Self::Neutral,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Which category of evidence produced a verdict.
///
/// The precedence order is a declared contract: divergence is the
/// strongest, most specific signal; trend is a coarser fallback;
/// market-structure direction is the weakest corroborating signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalCategory {
    /// Price/indicator divergence tagged by the backend.
    Divergence,
    /// Trend label (ADX/slope classification).
    Trend,
    /// Predicted next-leg direction from swing/pivot structure.
    MarketStructure,
    /// No evidence at all.
    None,
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Divergence => write!(f, "Divergence"),
            Self::Trend => write!(f, "Trend"),
            Self::MarketStructure => write!(f, "MarketStructure"),
            Self::None => write!(f, "None"),
        }
    }
}

/// One verdict plus the evidence category that produced it.
///
/// Always resolves to exactly one of the three verdicts; total absence of
/// evidence yields `{Neutral, None}` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conclusion {
    /// The qualitative verdict.
    pub verdict: Verdict,
    /// The evidence category the verdict came from.
    pub source: SignalCategory,
}

impl Conclusion {
    /// Construct a conclusion.
    #[must_use]
    pub fn new(verdict: Verdict, source: SignalCategory) -> Self {
        Self { verdict, source }
    }

    /// The default conclusion when no evidence is present.
    #[must_use]
    pub fn neutral() -> Self {
        Self::new(Verdict::Neutral, SignalCategory::None)
    }
}

impl std::fmt::Display for Conclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.verdict, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_opposite() {
        assert_eq!(Verdict::Bullish.opposite(), Verdict::Bearish);
        assert_eq!(Verdict::Bearish.opposite(), Verdict::Bullish);
        assert_eq!(Verdict::Neutral.opposite(), Verdict::Neutral);
    }

    #[test]
    fn test_neutral_conclusion() {
        let c = Conclusion::neutral();
        assert_eq!(c.verdict, Verdict::Neutral);
        assert_eq!(c.source, SignalCategory::None);
    }

    #[test]
    fn test_display() {
        let c = Conclusion::new(Verdict::Bullish, SignalCategory::Divergence);
        assert_eq!(c.to_string(), "Bullish (Divergence)");
    }
}
