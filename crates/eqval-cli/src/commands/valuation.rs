use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use eqval_core::forecast::{build_forecast, DEFAULT_HORIZON};
use eqval_core::normalize::{IncomePeriod, NormalizedStatements};
use eqval_core::valuation::comps::{compute_comps, PeerInput};
use eqval_core::valuation::dcf::{build_sensitivity, compute_dcf, equity_bridge};
use eqval_core::valuation::ratios::compute_ratios;
use eqval_core::valuation::wacc::compute_capital_costs;
use eqval_core::{Assumptions, Rate};

use crate::input;

// ---------------------------------------------------------------------------
// WACC
// ---------------------------------------------------------------------------

/// Arguments for the capital cost calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct WaccArgs {
    /// Risk-free rate (e.g. 0.04 for 4%)
    #[arg(long)]
    pub risk_free: Option<Decimal>,

    /// Levered beta
    #[arg(long)]
    pub beta: Option<Decimal>,

    /// Equity risk premium
    #[arg(long, alias = "erp")]
    pub equity_risk_premium: Option<Decimal>,

    /// Marginal tax rate
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Debt weight in the capital structure
    #[arg(long)]
    pub debt_weight: Option<Decimal>,

    /// Credit rating for the spread lookup (AAA through CCC)
    #[arg(long)]
    pub credit_rating: Option<String>,

    /// Explicit credit spread (overrides the rating lookup)
    #[arg(long)]
    pub credit_spread: Option<Decimal>,

    /// Path to JSON assumption overrides (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_wacc(args: WaccArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions: Assumptions = if args.input.is_some() {
        input::load_request(&args.input)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        Assumptions {
            risk_free: args.risk_free,
            beta: args.beta,
            equity_risk_premium: args.equity_risk_premium,
            tax_rate: args.tax_rate,
            debt_weight: args.debt_weight,
            credit_rating: args.credit_rating,
            credit_spread: args.credit_spread,
            ..Assumptions::default()
        }
    };

    let out = compute_capital_costs(&assumptions.resolve());
    Ok(serde_json::to_value(&out)?)
}

// ---------------------------------------------------------------------------
// DCF
// ---------------------------------------------------------------------------

/// Arguments for the DCF valuation
#[derive(Args)]
pub struct DcfArgs {
    /// Path to a JSON file with income periods, assumptions, and optional
    /// equity-bridge and sensitivity inputs
    #[arg(long)]
    pub input: Option<String>,

    /// Number of forecast years (overrides the request)
    #[arg(long)]
    pub years: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DcfRequest {
    pub income_annual: Vec<IncomePeriod>,
    pub assumptions: Assumptions,
    pub horizon: Option<u32>,
    pub net_debt: Option<Decimal>,
    pub shares_outstanding: Option<Decimal>,
    pub sensitivity: Option<SensitivitySpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SensitivitySpec {
    pub waccs: Vec<Rate>,
    pub terminal_growths: Vec<Rate>,
}

pub fn run_dcf(args: DcfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let req: DcfRequest = input::load_request(&args.input)?;
    let resolved = req.assumptions.resolve();
    let horizon = args.years.or(req.horizon).unwrap_or(DEFAULT_HORIZON);

    let forecast = build_forecast(&req.income_annual, &resolved, horizon);
    let out = compute_dcf(&forecast, &resolved)?;

    let bridge = equity_bridge(
        out.result.enterprise_value,
        req.net_debt,
        req.shares_outstanding,
    );
    let grid = req
        .sensitivity
        .as_ref()
        .map(|spec| build_sensitivity(&forecast, &resolved, &spec.waccs, &spec.terminal_growths));

    let mut value = serde_json::to_value(&out)?;
    if let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) {
        result.insert("equityBridge".into(), serde_json::to_value(&bridge)?);
        if let Some(grid) = grid {
            result.insert("sensitivity".into(), serde_json::to_value(&grid)?);
        }
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

/// Arguments for per-period ratios
#[derive(Args)]
pub struct RatiosArgs {
    /// Path to a JSON file with normalized statements
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_ratios(args: RatiosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let statements: NormalizedStatements = input::load_request(&args.input)?;
    let out = compute_ratios(
        &statements.income_annual,
        &statements.balance_annual,
        &statements.cashflow_annual,
    );
    Ok(serde_json::to_value(&out)?)
}

// ---------------------------------------------------------------------------
// Comps
// ---------------------------------------------------------------------------

/// Arguments for comparable company analysis
#[derive(Args)]
pub struct CompsArgs {
    /// Path to a JSON file with peer company data
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompsRequest {
    pub peers: Vec<PeerInput>,
}

pub fn run_comps(args: CompsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let req: CompsRequest = input::load_request(&args.input)?;
    let out = compute_comps(&req.peers);
    Ok(serde_json::to_value(&out)?)
}
