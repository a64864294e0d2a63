//! Dated snapshots of the price graph.

use crate::core::commodity::CommodityId;
use crate::core::graph::PriceGraph;
use crate::core::normalized::NormalizedPrices;
use crate::core::price::Price;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// One [`PriceGraph`] per distinct observation date. Each snapshot holds every
/// price observed on or before its date.
#[derive(Debug, Default, Clone)]
pub struct PriceHistory {
    snapshots: BTreeMap<NaiveDate, PriceGraph>,
}

impl PriceHistory {
    /// Builds snapshots by replaying `prices` in date order. Prices sharing a
    /// date keep their input order, so the last one for a pair wins.
    pub fn from_prices(prices: impl IntoIterator<Item = Price>) -> Self {
        let mut prices: Vec<Price> = prices.into_iter().collect();
        prices.sort_by_key(|p| p.date);

        let mut snapshots = BTreeMap::new();
        let mut running = PriceGraph::new();
        let mut current_date = None;

        for price in &prices {
            if let Some(date) = current_date {
                if date != price.date {
                    snapshots.insert(date, running.copy());
                }
            }
            current_date = Some(price.date);
            running.insert(price);
        }
        if let Some(date) = current_date {
            snapshots.insert(date, running);
        }

        debug!(
            "Loaded {} prices into {} snapshots",
            prices.len(),
            snapshots.len()
        );
        Self { snapshots }
    }

    /// Graph in force on `date`: the snapshot of the latest observation date
    /// not after it.
    pub fn graph_at(&self, date: NaiveDate) -> Option<&PriceGraph> {
        self.snapshots
            .range(..=date)
            .next_back()
            .map(|(_, graph)| graph)
    }

    pub fn latest(&self) -> Option<(NaiveDate, &PriceGraph)> {
        self.snapshots
            .iter()
            .next_back()
            .map(|(date, graph)| (*date, graph))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.snapshots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Normalizes the graph in force on `date`. Before the first observation
    /// only `base` itself is priced.
    pub fn normalize_at(&self, date: NaiveDate, base: CommodityId) -> NormalizedPrices {
        match self.graph_at(date) {
            Some(graph) => graph.normalize(base),
            None => {
                debug!("No prices on or before {date}");
                PriceGraph::new().normalize(base)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commodity::CommodityRegistry;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_snapshots_per_date() {
        let mut registry = CommodityRegistry::new();
        let (usd, eur, gbp) = (
            registry.intern("USD"),
            registry.intern("EUR"),
            registry.intern("GBP"),
        );
        // Deliberately out of order
        let history = PriceHistory::from_prices(vec![
            Price::new(ymd(2024, 2, 1), eur, gbp, 0.85),
            Price::new(ymd(2024, 1, 1), usd, eur, 0.9),
            Price::new(ymd(2024, 3, 1), usd, eur, 0.95),
        ]);

        assert_eq!(history.len(), 3);
        assert_eq!(
            history.dates().collect::<Vec<_>>(),
            vec![ymd(2024, 1, 1), ymd(2024, 2, 1), ymd(2024, 3, 1)]
        );

        let jan = history.graph_at(ymd(2024, 1, 1)).unwrap();
        assert_eq!(jan.rate(eur, usd), Some(0.9));
        assert_eq!(jan.rate(gbp, eur), None);

        let feb = history.graph_at(ymd(2024, 2, 15)).unwrap();
        assert_eq!(feb.rate(eur, usd), Some(0.9));
        assert_eq!(feb.rate(gbp, eur), Some(0.85));

        let (date, latest) = history.latest().unwrap();
        assert_eq!(date, ymd(2024, 3, 1));
        assert_eq!(latest.rate(eur, usd), Some(0.95));
        assert_eq!(latest.rate(gbp, eur), Some(0.85));
    }

    #[test]
    fn test_same_date_last_wins() {
        let mut registry = CommodityRegistry::new();
        let (usd, eur) = (registry.intern("USD"), registry.intern("EUR"));
        let history = PriceHistory::from_prices(vec![
            Price::new(ymd(2024, 1, 1), usd, eur, 0.9),
            Price::new(ymd(2024, 1, 1), usd, eur, 0.91),
        ]);

        assert_eq!(history.len(), 1);
        let graph = history.graph_at(ymd(2024, 1, 1)).unwrap();
        assert_eq!(graph.rate(eur, usd), Some(0.91));
    }

    #[test]
    fn test_before_first_date() {
        let mut registry = CommodityRegistry::new();
        let (usd, eur) = (registry.intern("USD"), registry.intern("EUR"));
        let history = PriceHistory::from_prices(vec![Price::new(ymd(2024, 1, 1), usd, eur, 0.9)]);

        assert!(history.graph_at(ymd(2023, 12, 31)).is_none());

        let prices = history.normalize_at(ymd(2023, 12, 31), eur);
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get(eur), Some(1.0));
        assert!(!prices.contains(usd));

        let prices = history.normalize_at(ymd(2024, 6, 1), eur);
        assert_eq!(prices.get(usd), Some(0.9));
    }

    #[test]
    fn test_empty_history() {
        let history = PriceHistory::from_prices(Vec::new());
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }
}
