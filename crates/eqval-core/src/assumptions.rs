//! Central assumptions schema.
//!
//! Every model parameter a user can tune lives here, with its default in one
//! place. Callers build an [`Assumptions`] (any subset of fields), call
//! [`Assumptions::resolve`] once at the boundary, and hand the resulting
//! [`ResolvedAssumptions`] to every model. Models never re-derive defaults
//! and treat the resolved value as immutable for the duration of a run.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Multiple, Rate};

/// User-supplied assumption overrides. Absent fields take the documented
/// default during [`resolve`](Assumptions::resolve).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assumptions {
    /// Annual revenue growth rate. Default 0.05.
    pub revenue_growth: Option<Rate>,
    /// EBITDA as a fraction of revenue. Default 0.25.
    pub ebitda_margin: Option<Rate>,
    /// EBIT as a fraction of revenue. Default 0.18.
    pub ebit_margin: Option<Rate>,
    /// Depreciation & amortization as a fraction of revenue. Default 0.03.
    pub da_pct: Option<Rate>,
    /// Capital expenditure as a fraction of revenue. Default 0.04.
    pub capex_pct: Option<Rate>,
    /// Net working capital as a fraction of revenue. Default 0.02.
    pub nwc_pct: Option<Rate>,
    /// Marginal tax rate. Default 0.23.
    pub tax_rate: Option<Rate>,
    /// Discount rate for the DCF. Default 0.10.
    pub wacc: Option<Rate>,
    /// Perpetuity growth rate for the terminal value. Default 0.02.
    pub terminal_growth: Option<Rate>,
    /// LBO entry EV/EBITDA multiple. Default 8.
    pub entry_multiple: Option<Multiple>,
    /// LBO exit EV/EBITDA multiple. Default 9.
    pub exit_multiple: Option<Multiple>,
    /// Debt as a fraction of total LBO uses. Default 0.60.
    pub debt_pct: Option<Rate>,
    /// Transaction fees as a fraction of entry enterprise value. Default 0.02.
    pub fee_pct: Option<Rate>,
    /// Annual amortization of the current debt balance. Default 0.10.
    pub amort_pct: Option<Rate>,
    /// Acquisition premium over target market cap. Default 0.25.
    pub premium: Option<Rate>,
    /// Cash fraction of merger consideration. Default 0.50.
    pub cash_mix: Option<Rate>,
    /// Stock fraction of merger consideration. Default 0.30.
    pub stock_mix: Option<Rate>,
    /// Debt fraction of merger consideration. Default 0.20.
    pub debt_mix: Option<Rate>,
    /// Annual run-rate synergies. Default 0.
    pub synergies: Option<Money>,
    /// One-time integration costs. Default 0.
    pub integration_costs: Option<Money>,
    /// Risk-free rate for CAPM and cost of debt. Default 0.04.
    pub risk_free: Option<Rate>,
    /// Levered equity beta. Default 1.1.
    pub beta: Option<Decimal>,
    /// Equity risk premium. Default 0.05.
    pub equity_risk_premium: Option<Rate>,
    /// Weight of debt in the capital structure. Default 0.40.
    pub debt_weight: Option<Rate>,
    /// Credit rating used to look up a debt spread. No default; an absent or
    /// unrecognized rating falls back to the fixed spread in
    /// [`crate::valuation::wacc::rating_spread`].
    pub credit_rating: Option<String>,
    /// Explicit credit spread override. Takes priority over the rating table.
    pub credit_spread: Option<Rate>,
}

/// Fully-populated assumptions, produced once by [`Assumptions::resolve`].
///
/// The three financing mix weights are carried as supplied and are NOT
/// validated to sum to 1; that is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAssumptions {
    pub revenue_growth: Rate,
    pub ebitda_margin: Rate,
    pub ebit_margin: Rate,
    pub da_pct: Rate,
    pub capex_pct: Rate,
    pub nwc_pct: Rate,
    pub tax_rate: Rate,
    pub wacc: Rate,
    pub terminal_growth: Rate,
    pub entry_multiple: Multiple,
    pub exit_multiple: Multiple,
    pub debt_pct: Rate,
    pub fee_pct: Rate,
    pub amort_pct: Rate,
    pub premium: Rate,
    pub cash_mix: Rate,
    pub stock_mix: Rate,
    pub debt_mix: Rate,
    pub synergies: Money,
    pub integration_costs: Money,
    pub risk_free: Rate,
    pub beta: Decimal,
    pub equity_risk_premium: Rate,
    pub debt_weight: Rate,
    pub credit_rating: Option<String>,
    pub credit_spread: Option<Rate>,
}

impl Assumptions {
    /// Fill every absent field with its documented default. Called once at
    /// the boundary; models downstream never merge defaults themselves.
    pub fn resolve(&self) -> ResolvedAssumptions {
        ResolvedAssumptions {
            revenue_growth: self.revenue_growth.unwrap_or(dec!(0.05)),
            ebitda_margin: self.ebitda_margin.unwrap_or(dec!(0.25)),
            ebit_margin: self.ebit_margin.unwrap_or(dec!(0.18)),
            da_pct: self.da_pct.unwrap_or(dec!(0.03)),
            capex_pct: self.capex_pct.unwrap_or(dec!(0.04)),
            nwc_pct: self.nwc_pct.unwrap_or(dec!(0.02)),
            tax_rate: self.tax_rate.unwrap_or(dec!(0.23)),
            wacc: self.wacc.unwrap_or(dec!(0.10)),
            terminal_growth: self.terminal_growth.unwrap_or(dec!(0.02)),
            entry_multiple: self.entry_multiple.unwrap_or(dec!(8)),
            exit_multiple: self.exit_multiple.unwrap_or(dec!(9)),
            debt_pct: self.debt_pct.unwrap_or(dec!(0.60)),
            fee_pct: self.fee_pct.unwrap_or(dec!(0.02)),
            amort_pct: self.amort_pct.unwrap_or(dec!(0.10)),
            premium: self.premium.unwrap_or(dec!(0.25)),
            cash_mix: self.cash_mix.unwrap_or(dec!(0.50)),
            stock_mix: self.stock_mix.unwrap_or(dec!(0.30)),
            debt_mix: self.debt_mix.unwrap_or(dec!(0.20)),
            synergies: self.synergies.unwrap_or(Decimal::ZERO),
            integration_costs: self.integration_costs.unwrap_or(Decimal::ZERO),
            risk_free: self.risk_free.unwrap_or(dec!(0.04)),
            beta: self.beta.unwrap_or(dec!(1.1)),
            equity_risk_premium: self.equity_risk_premium.unwrap_or(dec!(0.05)),
            debt_weight: self.debt_weight.unwrap_or(dec!(0.40)),
            credit_rating: self.credit_rating.clone(),
            credit_spread: self.credit_spread,
        }
    }
}

impl Default for ResolvedAssumptions {
    fn default() -> Self {
        Assumptions::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_applies_documented_defaults() {
        let resolved = Assumptions::default().resolve();

        assert_eq!(resolved.revenue_growth, dec!(0.05));
        assert_eq!(resolved.ebitda_margin, dec!(0.25));
        assert_eq!(resolved.tax_rate, dec!(0.23));
        assert_eq!(resolved.wacc, dec!(0.10));
        assert_eq!(resolved.terminal_growth, dec!(0.02));
        assert_eq!(resolved.entry_multiple, dec!(8));
        assert_eq!(resolved.exit_multiple, dec!(9));
        assert_eq!(resolved.cash_mix, dec!(0.50));
        assert_eq!(resolved.synergies, Decimal::ZERO);
        assert_eq!(resolved.credit_rating, None);
    }

    #[test]
    fn test_resolve_keeps_overrides() {
        let overrides = Assumptions {
            revenue_growth: Some(dec!(0.12)),
            wacc: Some(dec!(0.085)),
            credit_rating: Some("BB".into()),
            ..Assumptions::default()
        };
        let resolved = overrides.resolve();

        assert_eq!(resolved.revenue_growth, dec!(0.12));
        assert_eq!(resolved.wacc, dec!(0.085));
        assert_eq!(resolved.credit_rating.as_deref(), Some("BB"));
        // Untouched fields still default
        assert_eq!(resolved.ebitda_margin, dec!(0.25));
    }

    #[test]
    fn test_resolve_does_not_mutate_source() {
        let overrides = Assumptions {
            wacc: Some(dec!(0.09)),
            ..Assumptions::default()
        };
        let before = overrides.clone();
        let _ = overrides.resolve();
        assert_eq!(overrides, before);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{"revenueGrowth": "0.07", "taxRate": "0.21"}"#;
        let parsed: Assumptions = serde_json::from_str(json).unwrap();
        let resolved = parsed.resolve();

        assert_eq!(resolved.revenue_growth, dec!(0.07));
        assert_eq!(resolved.tax_rate, dec!(0.21));
        assert_eq!(resolved.terminal_growth, dec!(0.02));
    }
}
