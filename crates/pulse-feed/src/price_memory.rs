//! Last-observed-price memory.
//!
//! Keeps exactly one observation per symbol so the price feed can derive
//! a period-over-period percentage change when the upstream payload does
//! not supply `change_24h`.

use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// Result of recording one price observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceTick {
    /// The observed price.
    pub price: Decimal,
    /// Change from the previous observation, percent, 2 decimals.
    pub change_percent: Decimal,
}

/// Keyed store of the most recent observed price per symbol.
///
/// O(1) space per tracked symbol, overwritten on every successful price
/// fetch. Symbol slots are independent; concurrent updates to distinct
/// symbols never interact.
#[derive(Debug, Default)]
pub struct PriceMemory {
    last: DashMap<String, Decimal>,
}

impl PriceMemory {
    /// Create an empty price memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: DashMap::new(),
        }
    }

    /// Create a price memory wrapped in Arc for sharing.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Record an observation and return the derived delta.
    ///
    /// The very first observation of a symbol has no prior baseline and
    /// reports a change of exactly 0.00%, not an error. The baseline
    /// becomes the current price either way. A stored baseline of zero
    /// is treated the same as no baseline.
    pub fn update(&self, symbol: &str, price: Decimal) -> PriceTick {
        let previous = self.last.insert(symbol.to_string(), price);

        let change_percent = match previous {
            Some(prev) if !prev.is_zero() => {
                ((price - prev) / prev * Decimal::ONE_HUNDRED).round_dp(2)
            }
            _ => Decimal::ZERO,
        };

        PriceTick {
            price,
            change_percent,
        }
    }

    /// Last observed price for a symbol.
    #[must_use]
    pub fn last_price(&self, symbol: &str) -> Option<Decimal> {
        self.last.get(symbol).map(|p| *p)
    }

    /// Number of tracked symbols.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.last.len()
    }

    /// Drop the baseline for one symbol.
    pub fn clear(&self, symbol: &str) {
        self.last.remove(symbol);
    }

    /// Drop all baselines.
    pub fn clear_all(&self) {
        self.last.clear();
    }
}

/// Thread-safe handle to PriceMemory.
pub type PriceMemoryHandle = Arc<PriceMemory>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_observation_is_zero_percent() {
        let memory = PriceMemory::new();
        let tick = memory.update("BTC", dec!(100));
        assert_eq!(tick.price, dec!(100));
        assert_eq!(tick.change_percent, dec!(0.00));
    }

    #[test]
    fn test_delta_from_previous_observation() {
        let memory = PriceMemory::new();
        memory.update("BTC", dec!(100));
        let tick = memory.update("BTC", dec!(110));
        assert_eq!(tick.change_percent, dec!(10.00));
    }

    #[test]
    fn test_negative_delta() {
        let memory = PriceMemory::new();
        memory.update("ETH", dec!(2000));
        let tick = memory.update("ETH", dec!(1900));
        assert_eq!(tick.change_percent, dec!(-5.00));
    }

    #[test]
    fn test_delta_rounded_to_two_decimals() {
        let memory = PriceMemory::new();
        memory.update("SOL", dec!(3));
        let tick = memory.update("SOL", dec!(4));
        // 33.333...% rounds to 33.33
        assert_eq!(tick.change_percent, dec!(33.33));
    }

    #[test]
    fn test_baseline_advances_on_each_update() {
        let memory = PriceMemory::new();
        memory.update("BTC", dec!(100));
        memory.update("BTC", dec!(110));
        let tick = memory.update("BTC", dec!(110));
        assert_eq!(tick.change_percent, dec!(0.00));
        assert_eq!(memory.last_price("BTC"), Some(dec!(110)));
    }

    #[test]
    fn test_symbols_are_independent() {
        let memory = PriceMemory::new();
        memory.update("BTC", dec!(100));
        memory.update("ETH", dec!(2000));

        let btc = memory.update("BTC", dec!(105));
        let eth = memory.update("ETH", dec!(2000));
        assert_eq!(btc.change_percent, dec!(5.00));
        assert_eq!(eth.change_percent, dec!(0.00));
        assert_eq!(memory.symbol_count(), 2);
    }

    #[test]
    fn test_zero_baseline_treated_as_first_observation() {
        let memory = PriceMemory::new();
        memory.update("DUST", dec!(0));
        let tick = memory.update("DUST", dec!(5));
        assert_eq!(tick.change_percent, dec!(0.00));
    }

    #[test]
    fn test_clear() {
        let memory = PriceMemory::new();
        memory.update("BTC", dec!(100));
        memory.clear("BTC");
        assert!(memory.last_price("BTC").is_none());

        let tick = memory.update("BTC", dec!(200));
        assert_eq!(tick.change_percent, dec!(0.00));
    }
}
