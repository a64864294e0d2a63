use crate::core::commodity::CommodityRegistry;
use crate::core::history::PriceHistory;
use crate::core::price::Price;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PriceEntry {
    pub date: NaiveDate,
    pub commodity: String,
    pub target: String,
    pub rate: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Holding {
    pub commodity: String,
    pub amount: Decimal,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub base: String,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "pricegraph")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Rejects input the price graph cannot take: rates must be finite and
    /// positive, and every commodity needs a symbol.
    pub fn validate(&self) -> Result<()> {
        if self.base.trim().is_empty() {
            bail!("Base commodity must not be empty");
        }
        for (i, price) in self.prices.iter().enumerate() {
            if price.commodity.trim().is_empty() || price.target.trim().is_empty() {
                bail!("Price #{i} on {} has an empty commodity", price.date);
            }
            if price.commodity.trim() == price.target.trim() {
                bail!(
                    "Price #{i} on {} prices {} in itself",
                    price.date,
                    price.commodity
                );
            }
            if !price.rate.is_finite() || price.rate <= 0.0 {
                bail!(
                    "Price #{i} on {} for {} in {} has invalid rate {}",
                    price.date,
                    price.commodity,
                    price.target,
                    price.rate
                );
            }
        }
        for (i, holding) in self.holdings.iter().enumerate() {
            if holding.commodity.trim().is_empty() {
                bail!("Holding #{i} has an empty commodity");
            }
        }
        Ok(())
    }

    /// Interns every commodity mentioned in the config and replays the
    /// prices into dated snapshots.
    pub fn price_history(&self, registry: &mut CommodityRegistry) -> PriceHistory {
        registry.intern(&self.base);
        let prices: Vec<Price> = self
            .prices
            .iter()
            .map(|p| {
                Price::new(
                    p.date,
                    registry.intern(&p.commodity),
                    registry.intern(&p.target),
                    p.rate,
                )
            })
            .collect();
        for holding in &self.holdings {
            registry.intern(&holding.commodity);
        }
        PriceHistory::from_prices(prices)
    }
}
