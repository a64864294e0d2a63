pub mod cli;
pub mod core;

use crate::cli::ReportOptions;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub use crate::core::{
    CommodityId, CommodityRegistry, NormalizedPrices, Price, PriceError, PriceGraph, PriceHistory,
    PriceResult,
};

/// Reporting commands that read the configuration file.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Prices(ReportOptions),
    Value(ReportOptions),
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("pricegraph starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Prices(options) => cli::prices::run(&config, &options),
        AppCommand::Value(options) => cli::value::run(&config, &options),
    }
}
