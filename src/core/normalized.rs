//! Prices of commodities expressed in a single base commodity.

use crate::core::commodity::CommodityId;
use crate::core::error::{PriceError, PriceResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::collections::HashMap;

/// Rates of every commodity reachable from `base`, in units of `base` per unit
/// of the commodity. Built by [`PriceGraph::normalize`] and only valid for the
/// graph snapshot it was computed from.
///
/// [`PriceGraph::normalize`]: crate::core::graph::PriceGraph::normalize
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPrices {
    base: CommodityId,
    rates: HashMap<CommodityId, f64>,
}

impl NormalizedPrices {
    pub(crate) fn new(base: CommodityId, rates: HashMap<CommodityId, f64>) -> Self {
        Self { base, rates }
    }

    pub fn base(&self) -> CommodityId {
        self.base
    }

    pub fn get(&self, commodity: CommodityId) -> Option<f64> {
        self.rates.get(&commodity).copied()
    }

    pub fn contains(&self, commodity: CommodityId) -> bool {
        self.rates.contains_key(&commodity)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CommodityId, f64)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }

    /// Converts `amount` of `commodity` into the base commodity.
    ///
    /// The multiplication happens in `f64`, so the result carries floating
    /// point precision rather than the full precision of `amount`.
    pub fn valuate(&self, commodity: CommodityId, amount: Decimal) -> PriceResult<Decimal> {
        let rate = self
            .get(commodity)
            .ok_or_else(|| PriceError::no_price_found(commodity, self.base))?;
        let value = amount.to_f64().unwrap_or_default() * rate;
        Decimal::from_f64(value).ok_or(PriceError::Unrepresentable { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commodity::CommodityRegistry;
    use crate::core::graph::PriceGraph;
    use crate::core::price::Price;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn decimal(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn assert_decimal_close(actual: Decimal, expected: &str) {
        let diff = (actual - decimal(expected)).abs();
        assert!(diff < decimal("0.01"), "expected {expected}, got {actual}");
    }

    #[test]
    fn test_valuate_end_to_end() {
        let mut registry = CommodityRegistry::new();
        let (usd, eur, gbp) = (
            registry.intern("USD"),
            registry.intern("EUR"),
            registry.intern("GBP"),
        );
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut graph = PriceGraph::new();
        graph.insert(&Price::new(date, usd, eur, 0.9));
        graph.insert(&Price::new(date, eur, gbp, 0.85));

        let prices = graph.normalize(gbp);

        // 100 USD = 90 EUR = 76.5 GBP
        assert_decimal_close(prices.valuate(usd, decimal("100")).unwrap(), "76.50");
        assert_decimal_close(prices.valuate(eur, decimal("100")).unwrap(), "85.00");
        assert_decimal_close(prices.valuate(gbp, decimal("12.34")).unwrap(), "12.34");

        let prices = graph.normalize(usd);
        assert_decimal_close(prices.valuate(gbp, decimal("76.5")).unwrap(), "100.00");
    }

    #[test]
    fn test_valuate_unknown_commodity_fails() {
        let mut registry = CommodityRegistry::new();
        let (usd, eur, jpy) = (
            registry.intern("USD"),
            registry.intern("EUR"),
            registry.intern("JPY"),
        );
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut graph = PriceGraph::new();
        graph.insert(&Price::new(date, usd, eur, 0.9));

        let prices = graph.normalize(eur);
        let err = prices.valuate(jpy, decimal("1000")).unwrap_err();

        assert_eq!(err, PriceError::no_price_found(jpy, eur));
        assert_eq!(err.commodity(), Some(jpy));
        assert_eq!(err.to_string(), "No price found for #2 in base #1");
    }

    #[test]
    fn test_valuate_zero_and_negative_amounts() {
        let mut registry = CommodityRegistry::new();
        let (usd, eur) = (registry.intern("USD"), registry.intern("EUR"));
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut graph = PriceGraph::new();
        graph.insert(&Price::new(date, usd, eur, 2.0));

        let prices = graph.normalize(eur);
        assert_eq!(prices.valuate(usd, Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(prices.valuate(usd, decimal("-5")).unwrap(), decimal("-10"));
    }

    #[test]
    fn test_valuate_unrepresentable() {
        let mut registry = CommodityRegistry::new();
        let (usd, eur) = (registry.intern("USD"), registry.intern("EUR"));
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut graph = PriceGraph::new();
        graph.insert(&Price::new(date, usd, eur, 1e300));

        let prices = graph.normalize(eur);
        let err = prices.valuate(usd, decimal("1")).unwrap_err();
        assert!(matches!(err, PriceError::Unrepresentable { .. }));
    }
}
