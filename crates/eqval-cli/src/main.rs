mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::data::{ForecastArgs, NormalizeArgs};
use commands::ma::MergerArgs;
use commands::pe::LboArgs;
use commands::valuation::{CompsArgs, DcfArgs, RatiosArgs, WaccArgs};

/// Equity valuation workbench
#[derive(Parser)]
#[command(
    name = "eqval",
    version,
    about = "Financial statement normalization and valuation models",
    long_about = "Normalizes raw financial-statement payloads into a canonical form \
                  and runs valuation models on top of it with decimal precision: \
                  forecast projection, WACC, DCF with sensitivity, LBO, merger \
                  accretion/dilution, ratios, and trading comparables."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw statement payload into canonical form
    Normalize(NormalizeArgs),
    /// Project the latest income period forward
    Forecast(ForecastArgs),
    /// Run a discounted cash flow valuation
    Dcf(DcfArgs),
    /// Calculate CAPM cost of equity, cost of debt, and WACC
    Wacc(WaccArgs),
    /// Run a single-tranche LBO model
    Lbo(LboArgs),
    /// Run a merger accretion/dilution model
    Merger(MergerArgs),
    /// Per-period financial ratios
    Ratios(RatiosArgs),
    /// Comparable company multiples and summary
    Comps(CompsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Normalize(args) => commands::data::run_normalize(args),
        Commands::Forecast(args) => commands::data::run_forecast(args),
        Commands::Dcf(args) => commands::valuation::run_dcf(args),
        Commands::Wacc(args) => commands::valuation::run_wacc(args),
        Commands::Lbo(args) => commands::pe::run_lbo(args),
        Commands::Merger(args) => commands::ma::run_merger(args),
        Commands::Ratios(args) => commands::valuation::run_ratios(args),
        Commands::Comps(args) => commands::valuation::run_comps(args),
        Commands::Version => {
            println!("eqval {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
