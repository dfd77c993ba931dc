//! M&A accretion / dilution model.
//!
//! Prices the target at a premium to market cap, splits the consideration
//! across cash, stock and debt, and compares pro forma EPS against the
//! acquirer's standalone EPS. All per-share math is null-safe: unknown or
//! zero share counts make EPS and accretion unknown, never a panic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assumptions::ResolvedAssumptions;
use crate::num::{or_zero, safe_div};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::EqvalResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One side of the transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanySnapshot {
    pub name: String,
    pub market_cap: Option<Money>,
    pub ebitda: Option<Money>,
    pub net_debt: Option<Money>,
    pub net_income: Option<Money>,
    pub shares: Option<Decimal>,
    /// Reported EPS; derived from net income / shares when absent
    pub eps: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergerOutput {
    pub purchase_price: Money,
    pub cash_used: Money,
    pub stock_used: Money,
    pub debt_used: Money,
    pub pro_forma_ebitda: Money,
    pub pro_forma_net_debt: Money,
    pub pro_forma_eps: Option<Money>,
    pub standalone_eps: Option<Money>,
    /// Pro forma EPS over standalone EPS minus one; exactly zero when the
    /// two are equal
    pub accretion: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the merger model.
pub fn compute_merger(
    acquirer: &CompanySnapshot,
    target: &CompanySnapshot,
    a: &ResolvedAssumptions,
) -> EqvalResult<ComputationOutput<MergerOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    let mix_total = a.cash_mix + a.stock_mix + a.debt_mix;
    if mix_total != Decimal::ONE {
        warnings.push(format!(
            "Financing mix sums to {mix_total}, not 1; consideration is scaled accordingly"
        ));
    }
    if target.market_cap.is_none() {
        warnings.push("Target market cap unknown; purchase price is zero".to_string());
    }

    let target_price = or_zero(target.market_cap);
    let purchase_price = target_price * (Decimal::ONE + a.premium);

    let cash_used = purchase_price * a.cash_mix;
    let stock_used = purchase_price * a.stock_mix;
    let debt_used = purchase_price * a.debt_mix;

    let pro_forma_ebitda =
        or_zero(acquirer.ebitda) + or_zero(target.ebitda) + a.synergies - a.integration_costs;
    let pro_forma_net_debt =
        or_zero(acquirer.net_debt) + or_zero(target.net_debt) + debt_used;

    let combined_earnings = or_zero(acquirer.net_income)
        + or_zero(target.net_income)
        + a.synergies
        - a.integration_costs;
    let pro_forma_eps = safe_div(Some(combined_earnings), acquirer.shares);

    let standalone_eps = acquirer
        .eps
        .or_else(|| safe_div(acquirer.net_income, acquirer.shares));
    if standalone_eps.is_none() {
        warnings.push(
            "Acquirer standalone EPS unknown; accretion cannot be computed".to_string(),
        );
    }

    let accretion = if pro_forma_eps.is_some() && pro_forma_eps == standalone_eps {
        Some(Decimal::ZERO)
    } else {
        safe_div(pro_forma_eps, standalone_eps).map(|r| r - Decimal::ONE)
    };

    let output = MergerOutput {
        purchase_price,
        cash_used,
        stock_used,
        debt_used,
        pro_forma_ebitda,
        pro_forma_net_debt,
        pro_forma_eps,
        standalone_eps,
        accretion,
    };

    Ok(with_metadata(
        "Premium purchase price, cash/stock/debt split, pro forma EPS accretion",
        a,
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use rust_decimal_macros::dec;

    fn acquirer() -> CompanySnapshot {
        CompanySnapshot {
            name: "Acquirer".into(),
            market_cap: Some(dec!(5000)),
            ebitda: Some(dec!(500)),
            net_debt: Some(dec!(1000)),
            net_income: Some(dec!(300)),
            shares: Some(dec!(100)),
            eps: Some(dec!(3)),
        }
    }

    fn target() -> CompanySnapshot {
        CompanySnapshot {
            name: "Target".into(),
            market_cap: Some(dec!(1000)),
            ebitda: Some(dec!(120)),
            net_debt: Some(dec!(200)),
            net_income: Some(dec!(60)),
            shares: Some(dec!(50)),
            eps: Some(dec!(1.2)),
        }
    }

    fn assumptions() -> ResolvedAssumptions {
        Assumptions {
            premium: Some(dec!(0.25)),
            cash_mix: Some(dec!(0.5)),
            stock_mix: Some(dec!(0.3)),
            debt_mix: Some(dec!(0.2)),
            synergies: Some(Decimal::ZERO),
            integration_costs: Some(Decimal::ZERO),
            ..Assumptions::default()
        }
        .resolve()
    }

    #[test]
    fn test_purchase_price_and_financing_split() {
        let out = compute_merger(&acquirer(), &target(), &assumptions())
            .unwrap()
            .result;

        assert_eq!(out.purchase_price, dec!(1250));
        assert_eq!(out.cash_used, dec!(625));
        assert_eq!(out.stock_used, dec!(375));
        assert_eq!(out.debt_used, dec!(250));
    }

    #[test]
    fn test_pro_forma_aggregates() {
        let a = Assumptions {
            synergies: Some(dec!(50)),
            integration_costs: Some(dec!(20)),
            ..Assumptions::default()
        }
        .resolve();
        let out = compute_merger(&acquirer(), &target(), &a).unwrap().result;

        // 500 + 120 + 50 - 20
        assert_eq!(out.pro_forma_ebitda, dec!(650));
        // 1000 + 200 + debt financing
        assert_eq!(out.pro_forma_net_debt, dec!(1200) + out.debt_used);
    }

    #[test]
    fn test_accretion_against_standalone() {
        let out = compute_merger(&acquirer(), &target(), &assumptions())
            .unwrap()
            .result;

        // Pro forma EPS = (300 + 60) / 100 = 3.6; standalone 3.0
        assert_eq!(out.pro_forma_eps, Some(dec!(3.6)));
        assert_eq!(out.accretion, Some(dec!(0.2)));
    }

    #[test]
    fn test_accretion_exactly_zero_when_eps_unchanged() {
        // All-cash deal where the target contributes no earnings: pro forma
        // EPS equals standalone EPS.
        let inert_target = CompanySnapshot {
            name: "Shell".into(),
            market_cap: Some(dec!(1000)),
            net_income: Some(Decimal::ZERO),
            ..CompanySnapshot::default()
        };
        let a = Assumptions {
            cash_mix: Some(Decimal::ONE),
            stock_mix: Some(Decimal::ZERO),
            debt_mix: Some(Decimal::ZERO),
            ..Assumptions::default()
        }
        .resolve();

        let out = compute_merger(&acquirer(), &inert_target, &a).unwrap().result;
        assert_eq!(out.pro_forma_eps, out.standalone_eps);
        assert_eq!(out.accretion, Some(Decimal::ZERO));
    }

    #[test]
    fn test_standalone_eps_derived_when_not_reported() {
        let mut acq = acquirer();
        acq.eps = None;
        let out = compute_merger(&acq, &target(), &assumptions()).unwrap().result;

        assert_eq!(out.standalone_eps, Some(dec!(3)));
    }

    #[test]
    fn test_unknown_shares_make_eps_unknown() {
        let mut acq = acquirer();
        acq.shares = None;
        acq.eps = None;
        let out = compute_merger(&acq, &target(), &assumptions()).unwrap();

        assert_eq!(out.result.pro_forma_eps, None);
        assert_eq!(out.result.accretion, None);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("standalone EPS unknown")));
    }

    #[test]
    fn test_mix_sum_not_enforced_but_warned() {
        let a = Assumptions {
            cash_mix: Some(dec!(0.5)),
            stock_mix: Some(dec!(0.5)),
            debt_mix: Some(dec!(0.5)),
            ..Assumptions::default()
        }
        .resolve();
        let out = compute_merger(&acquirer(), &target(), &a).unwrap();

        assert!(out.warnings.iter().any(|w| w.contains("Financing mix")));
        // 1250 * 1.5 total consideration across the three legs
        let total =
            out.result.cash_used + out.result.stock_used + out.result.debt_used;
        assert_eq!(total, dec!(1875));
    }

    #[test]
    fn test_missing_target_market_cap_warns() {
        let mut tgt = target();
        tgt.market_cap = None;
        let out = compute_merger(&acquirer(), &tgt, &assumptions()).unwrap();

        assert_eq!(out.result.purchase_price, Decimal::ZERO);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("Target market cap unknown")));
    }
}
