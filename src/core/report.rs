//! Valuation of configured holdings against the price history.
use crate::core::commodity::{CommodityId, CommodityRegistry};
use crate::core::config::Holding;
use crate::core::error::PriceError;
use crate::core::history::PriceHistory;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Value of a single holding in the report's base commodity.
#[derive(Debug, Clone, Serialize)]
pub struct HoldingValue {
    pub commodity: String,
    pub name: Option<String>,
    pub amount: Decimal,
    pub rate: Option<f64>,
    pub value: Option<Decimal>,
    pub error: Option<String>,
}

/// All holdings valued in one base on one date. `total` is only set when
/// every holding could be valued.
#[derive(Debug, Clone, Serialize)]
pub struct ValuationReport {
    pub base: String,
    pub date: NaiveDate,
    pub holdings: Vec<HoldingValue>,
    pub total: Option<Decimal>,
}

/// Normalized rate of one commodity in the base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLine {
    pub commodity: String,
    pub rate: f64,
}

fn symbol_of(registry: &CommodityRegistry, id: CommodityId) -> String {
    registry
        .symbol(id)
        .map_or_else(|| id.to_string(), str::to_string)
}

fn describe(registry: &CommodityRegistry, err: &PriceError) -> String {
    match err {
        PriceError::NoPriceFound { commodity, base } => format!(
            "No price found for {} in {}",
            symbol_of(registry, *commodity),
            symbol_of(registry, *base)
        ),
        PriceError::Unrepresentable { .. } => err.to_string(),
    }
}

/// Values `holdings` in `base` using the prices in force on `date`.
///
/// Prices are normalized once; a holding that cannot be valued records its
/// error and leaves the others untouched.
pub fn value_holdings(
    history: &PriceHistory,
    registry: &CommodityRegistry,
    holdings: &[Holding],
    base: CommodityId,
    date: NaiveDate,
) -> ValuationReport {
    let prices = history.normalize_at(date, base);
    let mut report = ValuationReport {
        base: symbol_of(registry, base),
        date,
        holdings: Vec::with_capacity(holdings.len()),
        total: None,
    };
    let mut total = Decimal::ZERO;
    let mut all_valid = true;

    for holding in holdings {
        let mut line = HoldingValue {
            commodity: holding.commodity.clone(),
            name: holding.name.clone(),
            amount: holding.amount,
            rate: None,
            value: None,
            error: None,
        };

        let result = match registry.get(&holding.commodity) {
            Some(commodity) => {
                line.rate = prices.get(commodity);
                prices
                    .valuate(commodity, holding.amount)
                    .map_err(|e| describe(registry, &e))
            }
            None => Err(format!(
                "Unknown commodity {} in {}",
                holding.commodity, report.base
            )),
        };

        match result {
            Ok(value) => {
                debug!(
                    "Valued {} {} at {} {}",
                    holding.amount, holding.commodity, value, report.base
                );
                total += value;
                line.value = Some(value);
            }
            Err(e) => {
                debug!("Valuation failed for {}: {}", holding.commodity, e);
                all_valid = false;
                line.error = Some(e);
            }
        }
        report.holdings.push(line);
    }

    if all_valid {
        report.total = Some(total);
    }
    report
}

/// Normalized rates of every commodity reachable from `base` on `date`,
/// sorted by symbol.
pub fn price_table(
    history: &PriceHistory,
    registry: &CommodityRegistry,
    base: CommodityId,
    date: NaiveDate,
) -> Vec<PriceLine> {
    let mut lines: Vec<PriceLine> = history
        .normalize_at(date, base)
        .iter()
        .map(|(commodity, rate)| PriceLine {
            commodity: symbol_of(registry, commodity),
            rate,
        })
        .collect();
    lines.sort_by(|a, b| a.commodity.cmp(&b.commodity));
    lines
}
