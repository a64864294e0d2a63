//! Price observations

use crate::core::commodity::CommodityId;
use chrono::NaiveDate;

/// A dated exchange rate: one unit of `commodity` is worth `rate` units of
/// `target`. `rate` must be finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    pub date: NaiveDate,
    pub commodity: CommodityId,
    pub target: CommodityId,
    pub rate: f64,
}

impl Price {
    pub fn new(date: NaiveDate, commodity: CommodityId, target: CommodityId, rate: f64) -> Self {
        Self {
            date,
            commodity,
            target,
            rate,
        }
    }
}
