use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use eqval_core::forecast::{build_forecast, DEFAULT_HORIZON};
use eqval_core::normalize::IncomePeriod;
use eqval_core::types::with_metadata;
use eqval_core::{normalize, Assumptions, DataSource};

use crate::input;

/// Arguments for payload normalization
#[derive(Args)]
pub struct NormalizeArgs {
    /// Path to a raw payload JSON file
    #[arg(long)]
    pub input: Option<String>,

    /// Treat the payload as an already-canonical demo dataset
    #[arg(long)]
    pub demo: bool,
}

/// Arguments for forecast projection
#[derive(Args)]
pub struct ForecastArgs {
    /// Path to a JSON file with income periods and assumption overrides
    #[arg(long)]
    pub input: Option<String>,

    /// Number of years to project (overrides the request)
    #[arg(long)]
    pub years: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastRequest {
    pub income_annual: Vec<IncomePeriod>,
    pub assumptions: Assumptions,
    pub horizon: Option<u32>,
}

pub fn run_normalize(args: NormalizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload = input::load_value(&args.input)?;
    let source = if args.demo {
        DataSource::Demo
    } else {
        DataSource::Live
    };

    let out = normalize(&payload, source)?;
    Ok(serde_json::to_value(&out)?)
}

pub fn run_forecast(args: ForecastArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let req: ForecastRequest = input::load_request(&args.input)?;
    let resolved = req.assumptions.resolve();
    let horizon = args.years.or(req.horizon).unwrap_or(DEFAULT_HORIZON);

    let years = build_forecast(&req.income_annual, &resolved, horizon);
    let out = with_metadata(
        "Flat-margin revenue projection",
        &resolved,
        Vec::new(),
        years,
    );
    Ok(serde_json::to_value(&out)?)
}
