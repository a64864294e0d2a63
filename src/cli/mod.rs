//! Command implementations and terminal rendering

pub mod prices;
pub mod setup;
pub mod ui;
pub mod value;

use crate::core::config::AppConfig;
use crate::core::{CommodityId, CommodityRegistry, PriceHistory};
use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

/// Overrides and output options shared by the reporting commands.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub base: Option<String>,
    pub date: Option<NaiveDate>,
    pub json: bool,
}

/// Everything a report needs, derived once from the config.
pub(crate) struct Session {
    pub registry: CommodityRegistry,
    pub history: PriceHistory,
    pub base: CommodityId,
    pub date: NaiveDate,
}

impl Session {
    pub fn open(config: &AppConfig, options: &ReportOptions) -> Result<Self> {
        let mut registry = CommodityRegistry::new();
        let history = config.price_history(&mut registry);

        let base_symbol = options.base.as_deref().unwrap_or(&config.base).trim();
        if base_symbol.is_empty() {
            anyhow::bail!("Base commodity must not be empty");
        }
        let base = registry.intern(base_symbol);

        let date = options
            .date
            .or(config.date)
            .or_else(|| history.latest().map(|(date, _)| date))
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        debug!(
            "Reporting in {base_symbol} on {date} over {} snapshots",
            history.len()
        );

        Ok(Self {
            registry,
            history,
            base,
            date,
        })
    }
}
