//! Price graph, normalization and valuation

pub mod commodity;
pub mod config;
pub mod error;
pub mod graph;
pub mod history;
pub mod log;
pub mod normalized;
pub mod price;
pub mod report;

// Re-export main types for cleaner imports
pub use commodity::{CommodityId, CommodityRegistry};
pub use error::{PriceError, PriceResult};
pub use graph::PriceGraph;
pub use history::PriceHistory;
pub use normalized::NormalizedPrices;
pub use price::Price;
