use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use pricegraph::cli::ReportOptions;
use pricegraph::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct ReportArgs {
    /// Commodity to express prices in, overrides the config
    #[arg(short, long)]
    base: Option<String>,

    /// Valuation date (YYYY-MM-DD), defaults to the latest price date
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl From<ReportArgs> for ReportOptions {
    fn from(args: ReportArgs) -> Self {
        ReportOptions {
            base: args.base,
            date: args.date,
            json: args.json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display prices of all commodities in the base commodity
    Prices(ReportArgs),
    /// Display the value of all holdings in the base commodity
    Value(ReportArgs),
}

impl From<Commands> for pricegraph::AppCommand {
    fn from(cmd: Commands) -> pricegraph::AppCommand {
        match cmd {
            Commands::Prices(args) => pricegraph::AppCommand::Prices(args.into()),
            Commands::Value(args) => pricegraph::AppCommand::Value(args.into()),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => pricegraph::cli::setup::setup(),
        Some(cmd) => pricegraph::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
