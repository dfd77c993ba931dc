//! Discounted cash flow engine.
//!
//! Discounts the unlevered free cash flow of a forecast sequence and a
//! Gordon-growth terminal value to enterprise value, with an optional equity
//! bridge and a two-axis WACC / terminal-growth sensitivity grid.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::assumptions::ResolvedAssumptions;
use crate::error::EqvalError;
use crate::forecast::ForecastYear;
use crate::num::safe_div;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::EqvalResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One forecast period with its unlevered free cash flow and present value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcfPeriod {
    pub label: String,
    pub ebit: Money,
    pub da: Money,
    pub capex: Money,
    pub nwc: Money,
    pub unlevered_fcf: Money,
    pub discount_factor: Rate,
    pub pv: Money,
}

/// Output of the DCF valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcfOutput {
    pub periods: Vec<DcfPeriod>,
    /// Gordon-growth terminal value at the end of the horizon
    pub terminal_value: Money,
    /// Terminal value discounted to present
    pub terminal_pv: Money,
    /// Sum of period PVs plus discounted terminal value
    pub enterprise_value: Money,
    pub wacc: Rate,
    pub terminal_growth: Rate,
}

/// Equity bridge from enterprise value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityValue {
    pub equity_value: Money,
    /// Equity value per share; unknown when shares are unknown or zero
    pub implied_price: Option<Money>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the DCF over a forecast sequence.
///
/// UFCF per period is `EBIT * (1 - tax) + D&A - capex - NWC`; period k is
/// discounted at `(1 + wacc)^k` end-of-year. The terminal value capitalizes
/// the final period's UFCF at `(wacc - g)`, which requires `wacc > g`.
pub fn compute_dcf(
    forecast: &[ForecastYear],
    a: &ResolvedAssumptions,
) -> EqvalResult<ComputationOutput<DcfOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    if forecast.is_empty() {
        return Err(EqvalError::InsufficientData(
            "DCF requires at least one forecast period".into(),
        ));
    }
    if a.wacc <= a.terminal_growth {
        return Err(EqvalError::FinancialImpossibility(format!(
            "WACC ({}) must exceed terminal growth ({}) for the Gordon growth model",
            a.wacc, a.terminal_growth
        )));
    }

    let periods: Vec<DcfPeriod> = forecast
        .iter()
        .enumerate()
        .map(|(idx, year)| {
            let ufcf = year.ebit * (Decimal::ONE - a.tax_rate) + year.da - year.capex - year.nwc;
            let discount_factor =
                Decimal::ONE / (Decimal::ONE + a.wacc).powi(idx as i64 + 1);
            DcfPeriod {
                label: year.label.clone(),
                ebit: year.ebit,
                da: year.da,
                capex: year.capex,
                nwc: year.nwc,
                unlevered_fcf: ufcf,
                discount_factor,
                pv: ufcf * discount_factor,
            }
        })
        .collect();

    let last_ufcf = periods[periods.len() - 1].unlevered_fcf;
    let terminal_value =
        last_ufcf * (Decimal::ONE + a.terminal_growth) / (a.wacc - a.terminal_growth);
    let terminal_pv =
        terminal_value / (Decimal::ONE + a.wacc).powi(periods.len() as i64);

    let pv_sum: Money = periods.iter().map(|p| p.pv).sum();
    let enterprise_value = pv_sum + terminal_pv;

    if last_ufcf <= Decimal::ZERO {
        warnings.push(format!(
            "Final-period UFCF is {last_ufcf}; the terminal value is not meaningful"
        ));
    }

    let output = DcfOutput {
        periods,
        terminal_value,
        terminal_pv,
        enterprise_value,
        wacc: a.wacc,
        terminal_growth: a.terminal_growth,
    };

    Ok(with_metadata(
        "Unlevered DCF with Gordon growth terminal value",
        a,
        warnings,
        output,
    ))
}

/// Bridge enterprise value to equity value and an implied share price.
///
/// Net debt (total debt minus cash) folds absent components to zero, the
/// way the aggregate is reported; the implied price is unknown when shares
/// outstanding are unknown or zero.
pub fn equity_bridge(
    enterprise_value: Money,
    net_debt: Option<Money>,
    shares_outstanding: Option<Decimal>,
) -> EquityValue {
    let equity_value = enterprise_value - net_debt.unwrap_or(Decimal::ZERO);
    EquityValue {
        equity_value,
        implied_price: safe_div(Some(equity_value), shares_outstanding),
    }
}

/// Two-axis sensitivity grid: WACC values as rows, terminal growth values
/// as columns, each cell an independent full re-run. Cells where the WACC
/// does not exceed the growth rate are `None` rather than failing the grid.
pub fn build_sensitivity(
    forecast: &[ForecastYear],
    a: &ResolvedAssumptions,
    waccs: &[Rate],
    terminal_growths: &[Rate],
) -> Vec<Vec<Option<Money>>> {
    waccs
        .iter()
        .map(|&wacc| {
            terminal_growths
                .iter()
                .map(|&g| {
                    let cell = ResolvedAssumptions {
                        wacc,
                        terminal_growth: g,
                        ..a.clone()
                    };
                    compute_dcf(forecast, &cell)
                        .ok()
                        .map(|out| out.result.enterprise_value)
                })
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
