use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use eqval_core::forecast::{build_forecast, DEFAULT_HORIZON};
use eqval_core::normalize::IncomePeriod;
use eqval_core::pe::lbo::compute_lbo;
use eqval_core::Assumptions;

use crate::input;

/// Arguments for the LBO model
#[derive(Args)]
pub struct LboArgs {
    /// Path to a JSON file with income periods and assumption overrides
    #[arg(long)]
    pub input: Option<String>,

    /// Holding period in years (overrides the request)
    #[arg(long)]
    pub years: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LboRequest {
    pub income_annual: Vec<IncomePeriod>,
    pub assumptions: Assumptions,
    pub horizon: Option<u32>,
}

pub fn run_lbo(args: LboArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let req: LboRequest = input::load_request(&args.input)?;
    let resolved = req.assumptions.resolve();
    let horizon = args.years.or(req.horizon).unwrap_or(DEFAULT_HORIZON);

    let forecast = build_forecast(&req.income_annual, &resolved, horizon);
    let out = compute_lbo(&forecast, &resolved)?;
    Ok(serde_json::to_value(&out)?)
}
