//! Symmetric graph of exchange rates and its normalization to a base commodity.

use crate::core::commodity::CommodityId;
use crate::core::normalized::NormalizedPrices;
use crate::core::price::Price;
use std::collections::HashMap;
use tracing::debug;

/// Known exchange rates keyed by target, then commodity.
///
/// `rates[target][commodity] = r` means one unit of `commodity` is worth `r`
/// units of `target`. Every insert also stores the inverse edge, so the graph
/// is symmetric.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PriceGraph {
    rates: HashMap<CommodityId, HashMap<CommodityId, f64>>,
}

impl PriceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a price and its inverse. A later price for the same pair
    /// replaces the earlier one.
    pub fn insert(&mut self, price: &Price) {
        self.add_rate(price.target, price.commodity, price.rate);
        self.add_rate(price.commodity, price.target, 1.0 / price.rate);
    }

    fn add_rate(&mut self, target: CommodityId, commodity: CommodityId, rate: f64) {
        self.rates.entry(target).or_default().insert(commodity, rate);
    }

    /// Deep copy. Inner maps are owned, so neither graph sees later inserts
    /// into the other.
    pub fn copy(&self) -> Self {
        let mut graph = Self::new();
        for (target, rates) in &self.rates {
            for (commodity, rate) in rates {
                graph.add_rate(*target, *commodity, *rate);
            }
        }
        graph
    }

    /// Units of `target` per unit of `commodity`, if directly known.
    pub fn rate(&self, target: CommodityId, commodity: CommodityId) -> Option<f64> {
        self.rates.get(&target)?.get(&commodity).copied()
    }

    /// Commodities with a direct rate against `commodity`, with the edge
    /// weight `graph[commodity][neighbor]`.
    pub fn neighbors(&self, commodity: CommodityId) -> impl Iterator<Item = (CommodityId, f64)> + '_ {
        self.rates
            .get(&commodity)
            .into_iter()
            .flat_map(|rates| rates.iter().map(|(c, r)| (*c, *r)))
    }

    pub fn commodities(&self) -> impl Iterator<Item = CommodityId> + '_ {
        self.rates.keys().copied()
    }

    /// Number of commodities with at least one rate.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Computes the rate of every commodity reachable from `base`, expressed
    /// in `base`. The base itself is always priced at `1.0`.
    ///
    /// This is a work-list traversal, not a shortest-path search: pending
    /// candidates are overwritten by whichever settled neighbor reaches them
    /// last, and the order in which candidates are settled is unspecified.
    /// For graphs whose cycles are consistent the result does not depend on
    /// that order. For inconsistent graphs the chosen path is arbitrary.
    pub fn normalize(&self, base: CommodityId) -> NormalizedPrices {
        let mut frontier = HashMap::from([(base, 1.0)]);
        let mut settled = HashMap::new();

        while let Some(current) = frontier.keys().next().copied() {
            let Some(current_rate) = frontier.remove(&current) else {
                break;
            };
            settled.insert(current, current_rate);
            for (neighbor, weight) in self.neighbors(current) {
                if settled.contains_key(&neighbor) {
                    continue;
                }
                frontier.insert(neighbor, weight * current_rate);
            }
        }

        debug!(
            "Normalized {} of {} commodities to base {}",
            settled.len(),
            self.len(),
            base
        );
        NormalizedPrices::new(base, settled)
    }
}
