//! Error types for price valuation.

use crate::core::commodity::CommodityId;
use thiserror::Error;

/// Result alias for operations on normalized prices.
pub type PriceResult<T> = Result<T, PriceError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    /// The commodity is not reachable from the base of the normalized set.
    #[error("No price found for {commodity} in base {base}")]
    NoPriceFound {
        commodity: CommodityId,
        base: CommodityId,
    },

    /// The valuated amount does not fit into a decimal.
    #[error("Valuated amount {value} cannot be represented as a decimal")]
    Unrepresentable { value: f64 },
}

impl PriceError {
    pub fn no_price_found(commodity: CommodityId, base: CommodityId) -> Self {
        Self::NoPriceFound { commodity, base }
    }

    /// Commodity that could not be priced, if that is what went wrong.
    pub fn commodity(&self) -> Option<CommodityId> {
        match self {
            Self::NoPriceFound { commodity, .. } => Some(*commodity),
            Self::Unrepresentable { .. } => None,
        }
    }
}
