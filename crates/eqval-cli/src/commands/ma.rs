use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use eqval_core::ma::merger_model::{compute_merger, CompanySnapshot};
use eqval_core::Assumptions;

use crate::input;

/// Arguments for the merger model
#[derive(Args)]
pub struct MergerArgs {
    /// Path to a JSON file with acquirer, target, and assumption overrides
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergerRequest {
    pub acquirer: CompanySnapshot,
    pub target: CompanySnapshot,
    pub assumptions: Assumptions,
}

pub fn run_merger(args: MergerArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let req: MergerRequest = input::load_request(&args.input)?;
    let out = compute_merger(&req.acquirer, &req.target, &req.assumptions.resolve())?;
    Ok(serde_json::to_value(&out)?)
}
