//! Single-tranche LBO model.
//!
//! Entry is priced off the first forecast period's EBITDA, exit off the
//! last; one debt tranche amortizes by a fixed percentage of its current
//! balance each period. Returns are the closed-form money multiple and a
//! single-compounding IRR over the forecast horizon.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::assumptions::ResolvedAssumptions;
use crate::error::EqvalError;
use crate::forecast::ForecastYear;
use crate::num::safe_div;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Rate};
use crate::EqvalResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Sources and uses of funds at entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesUses {
    pub sources: Vec<(String, Money)>,
    pub uses: Vec<(String, Money)>,
    pub total_sources: Money,
    pub total_uses: Money,
}

/// Debt balance at the end of one forecast period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtYear {
    pub label: String,
    pub amortization: Money,
    pub ending_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LboOutput {
    pub entry_enterprise_value: Money,
    pub sources_uses: SourcesUses,
    pub debt: Money,
    pub sponsor_equity: Money,
    pub debt_schedule: Vec<DebtYear>,
    pub exit_enterprise_value: Money,
    pub exit_equity_value: Money,
    /// `None` when sponsor or exit equity is non-positive
    pub irr: Option<Rate>,
    pub money_multiple: Option<Multiple>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the LBO over a forecast sequence.
pub fn compute_lbo(
    forecast: &[ForecastYear],
    a: &ResolvedAssumptions,
) -> EqvalResult<ComputationOutput<LboOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    if forecast.is_empty() {
        return Err(EqvalError::InsufficientData(
            "LBO requires at least one forecast period".into(),
        ));
    }

    let entry_ebitda = forecast[0].ebitda;
    let entry_ev = entry_ebitda * a.entry_multiple;
    let total_uses = entry_ev * (Decimal::ONE + a.fee_pct);
    let debt = total_uses * a.debt_pct;
    let sponsor_equity = total_uses - debt;

    if entry_ebitda <= Decimal::ZERO {
        warnings.push(format!(
            "Entry EBITDA is {entry_ebitda}; the entry valuation is not meaningful"
        ));
    }

    let sources_uses = SourcesUses {
        sources: vec![
            ("Sponsor Equity".into(), sponsor_equity),
            ("Term Debt".into(), debt),
        ],
        uses: vec![
            ("Enterprise Value".into(), entry_ev),
            ("Transaction Fees".into(), entry_ev * a.fee_pct),
        ],
        total_sources: total_uses,
        total_uses,
    };

    // Amortize a fixed percentage of the CURRENT balance each period,
    // floored at zero. The schedule is non-increasing by construction.
    let mut balance = debt;
    let debt_schedule: Vec<DebtYear> = forecast
        .iter()
        .map(|year| {
            let amortization = (balance * a.amort_pct).min(balance);
            balance = (balance - amortization).max(Decimal::ZERO);
            DebtYear {
                label: year.label.clone(),
                amortization,
                ending_balance: balance,
            }
        })
        .collect();

    let exit_ev = forecast[forecast.len() - 1].ebitda * a.exit_multiple;
    let exit_equity = exit_ev - balance;

    if exit_equity <= Decimal::ZERO {
        warnings.push(format!(
            "Exit equity is {exit_equity}; sponsor equity is wiped out and IRR is undefined"
        ));
    }

    let irr = irr_over_horizon(exit_equity, sponsor_equity, forecast.len() as u32);
    let money_multiple = safe_div(Some(exit_equity), Some(sponsor_equity));

    let output = LboOutput {
        entry_enterprise_value: entry_ev,
        sources_uses,
        debt,
        sponsor_equity,
        debt_schedule,
        exit_enterprise_value: exit_ev,
        exit_equity_value: exit_equity,
        irr,
        money_multiple,
    };

    Ok(with_metadata(
        "Single-tranche LBO with fixed-percentage amortization",
        a,
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Closed-form IRR: `(exit / entry)^(1/n) - 1`. Defined only when both
/// sides are positive.
fn irr_over_horizon(exit_equity: Money, sponsor_equity: Money, years: u32) -> Option<Rate> {
    if exit_equity <= Decimal::ZERO || sponsor_equity <= Decimal::ZERO || years == 0 {
        return None;
    }
    let ratio = exit_equity / sponsor_equity;
    let exponent = Decimal::ONE / Decimal::from(years);
    ratio.checked_powd(exponent).map(|r| r - Decimal::ONE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
