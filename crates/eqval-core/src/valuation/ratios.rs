//! Per-period financial ratios.
//!
//! Income periods drive the output: one `RatioRow` per income period, joined
//! by index to the balance and cash flow sequences. A missing balance or
//! cash flow row at an index degrades those ratios to `None`; it never fails
//! the computation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::normalize::{BalancePeriod, CashflowPeriod, IncomePeriod};
use crate::num::{or_zero, safe_div};
use crate::types::{with_metadata, ComputationOutput, Multiple, Rate};

/// Fixed NOPAT retention applied to EBIT for ROIC. Deliberately independent
/// of the configured tax-rate assumption.
pub const NOPAT_RETENTION: Decimal = dec!(0.75);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Ratios for one reporting period. Every ratio is `None` when any required
/// input is unknown or its denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioRow {
    pub date: String,
    pub gross_margin: Option<Rate>,
    pub ebitda_margin: Option<Rate>,
    pub ebit_margin: Option<Rate>,
    pub roe: Option<Rate>,
    pub roa: Option<Rate>,
    pub roic: Option<Rate>,
    pub current_ratio: Option<Multiple>,
    pub quick_ratio: Option<Multiple>,
    pub debt_to_ebitda: Option<Multiple>,
    pub net_debt_to_ebitda: Option<Multiple>,
    pub debt_to_equity: Option<Multiple>,
    pub interest_coverage: Option<Multiple>,
    pub fcf_margin: Option<Rate>,
    pub fcf_conversion: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the full ratio set for each income period.
pub fn compute_ratios(
    income: &[IncomePeriod],
    balance: &[BalancePeriod],
    cashflow: &[CashflowPeriod],
) -> ComputationOutput<Vec<RatioRow>> {
    let mut warnings = Vec::new();
    if balance.len() < income.len() {
        warnings.push(format!(
            "Balance sheet has {} periods for {} income periods; unmatched rows carry no balance ratios",
            balance.len(),
            income.len()
        ));
    }
    if cashflow.len() < income.len() {
        warnings.push(format!(
            "Cash flow statement has {} periods for {} income periods; unmatched rows carry no cash flow ratios",
            cashflow.len(),
            income.len()
        ));
    }

    let empty_balance = BalancePeriod::default();
    let empty_cashflow = CashflowPeriod::default();

    let rows = income
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let bal = balance.get(idx).unwrap_or(&empty_balance);
            let cf = cashflow.get(idx).unwrap_or(&empty_cashflow);
            ratio_row(row, bal, cf)
        })
        .collect();

    with_metadata(
        "Per-period margins, returns, liquidity, leverage and cash flow ratios",
        &serde_json::json!({ "periods": income.len() }),
        warnings,
        rows,
    )
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn ratio_row(income: &IncomePeriod, bal: &BalancePeriod, cf: &CashflowPeriod) -> RatioRow {
    // Invested capital folds unknowns to zero, matching how the aggregate
    // is quoted; NOPAT stays unknown when EBIT is unknown.
    let invested_capital =
        or_zero(bal.total_assets) - or_zero(bal.total_current_liabilities);
    let nopat = income.ebit.map(|e| e * NOPAT_RETENTION);
    let net_debt = or_zero(bal.total_debt) - or_zero(bal.cash);

    RatioRow {
        date: income.date.clone(),
        gross_margin: safe_div(income.gross_profit, income.revenue),
        ebitda_margin: safe_div(income.ebitda, income.revenue),
        ebit_margin: safe_div(income.ebit, income.revenue),
        roe: safe_div(income.net_income, bal.total_equity),
        roa: safe_div(income.net_income, bal.total_assets),
        roic: safe_div(nopat, Some(invested_capital)),
        current_ratio: safe_div(bal.total_current_assets, bal.total_current_liabilities),
        // No inventory line exists in the canonical record, so the quick
        // ratio collapses to current assets over current liabilities.
        quick_ratio: safe_div(bal.total_current_assets, bal.total_current_liabilities),
        debt_to_ebitda: safe_div(bal.total_debt, income.ebitda),
        net_debt_to_ebitda: safe_div(Some(net_debt), income.ebitda),
        debt_to_equity: safe_div(bal.total_debt, bal.total_equity),
        interest_coverage: safe_div(income.ebit, income.interest_expense),
        fcf_margin: safe_div(cf.free_cash_flow, income.revenue),
        fcf_conversion: safe_div(cf.free_cash_flow, income.net_income),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
