//! Capital cost engine: CAPM cost of equity, rating-spread cost of debt,
//! and the blended WACC.
//!
//! All three are pure, stateless, order-independent computations. Inputs
//! are not bounds-checked: an out-of-range value (a negative risk-free
//! rate, a debt weight above 1) passes through the arithmetic unchanged.
//! That is documented behavior, not an oversight.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::ResolvedAssumptions;
use crate::num::safe_div;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Rate};

/// Spread applied when the rating is absent or not in the table.
pub const FALLBACK_SPREAD: Rate = dec!(0.02);

/// Rating to credit-spread lookup, investment grade through distressed.
static RATING_SPREADS: &[(&str, Rate)] = &[
    ("AAA", dec!(0.005)),
    ("AA", dec!(0.007)),
    ("A", dec!(0.010)),
    ("BBB", dec!(0.015)),
    ("BB", dec!(0.025)),
    ("B", dec!(0.040)),
    ("CCC", dec!(0.080)),
];

/// Combined capital cost output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalCostOutput {
    pub cost_of_equity: Rate,
    pub cost_of_debt: Rate,
    pub credit_spread: Rate,
    pub wacc: Rate,
}

/// Cost of equity via CAPM: `riskFree + beta * equityRiskPremium`.
pub fn cost_of_equity_capm(a: &ResolvedAssumptions) -> Rate {
    a.risk_free + a.beta * a.equity_risk_premium
}

/// Spread for a rating, falling back to [`FALLBACK_SPREAD`] when the rating
/// is absent or unrecognized.
pub fn rating_spread(rating: Option<&str>) -> Rate {
    rating
        .and_then(|r| {
            RATING_SPREADS
                .iter()
                .find(|(name, _)| *name == r)
                .map(|(_, spread)| *spread)
        })
        .unwrap_or(FALLBACK_SPREAD)
}

/// Pre-tax cost of debt: `riskFree + spread`. An explicit spread assumption
/// takes priority over the rating table.
pub fn cost_of_debt(a: &ResolvedAssumptions) -> Rate {
    let spread = a
        .credit_spread
        .unwrap_or_else(|| rating_spread(a.credit_rating.as_deref()));
    a.risk_free + spread
}

/// Blended WACC. The equity weight is `1 - debtWeight`; debt carries the
/// tax shield.
pub fn wacc(a: &ResolvedAssumptions, cost_of_equity: Rate, cost_of_debt: Rate) -> Rate {
    let equity_weight = Decimal::ONE - a.debt_weight;
    cost_of_equity * equity_weight + cost_of_debt * (Decimal::ONE - a.tax_rate) * a.debt_weight
}

/// Debt / EBITDA, null-safe.
pub fn target_leverage(total_debt: Option<Money>, ebitda: Option<Money>) -> Option<Multiple> {
    safe_div(total_debt, ebitda)
}

/// Compute all capital costs from one resolved assumption set.
pub fn compute_capital_costs(a: &ResolvedAssumptions) -> ComputationOutput<CapitalCostOutput> {
    let spread = a
        .credit_spread
        .unwrap_or_else(|| rating_spread(a.credit_rating.as_deref()));
    let ke = cost_of_equity_capm(a);
    let kd = a.risk_free + spread;

    let output = CapitalCostOutput {
        cost_of_equity: ke,
        cost_of_debt: kd,
        credit_spread: spread,
        wacc: wacc(a, ke, kd),
    };

    with_metadata(
        "CAPM cost of equity, rating-spread cost of debt, blended WACC",
        a,
        Vec::new(),
        output,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
