//! Forecast projector.
//!
//! Rolls the most recent canonical income period forward `horizon` years:
//! revenue compounds at the assumed growth rate, and every other line item
//! is a flat percentage of that period's revenue. The projection depends
//! only on the seed period and the resolved assumptions, never on a prior
//! model run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assumptions::ResolvedAssumptions;
use crate::normalize::IncomePeriod;
use crate::types::Money;

/// Default number of projected periods.
pub const DEFAULT_HORIZON: u32 = 5;

/// One projected future period, labeled `FY+n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastYear {
    pub label: String,
    pub revenue: Money,
    pub ebitda: Money,
    pub ebit: Money,
    pub da: Money,
    pub capex: Money,
    pub nwc: Money,
}

/// Project the latest income period forward.
///
/// The seed is the revenue of the first (most recent) period, or zero when
/// the sequence is empty or the period's revenue is unknown.
pub fn build_forecast(
    base_income: &[IncomePeriod],
    assumptions: &ResolvedAssumptions,
    horizon: u32,
) -> Vec<ForecastYear> {
    let mut revenue = base_income
        .first()
        .and_then(|period| period.revenue)
        .unwrap_or(Decimal::ZERO);

    let mut years = Vec::with_capacity(horizon as usize);
    for n in 1..=horizon {
        revenue *= Decimal::ONE + assumptions.revenue_growth;
        years.push(ForecastYear {
            label: format!("FY+{n}"),
            revenue,
            ebitda: revenue * assumptions.ebitda_margin,
            ebit: revenue * assumptions.ebit_margin,
            da: revenue * assumptions.da_pct,
            capex: revenue * assumptions.capex_pct,
            nwc: revenue * assumptions.nwc_pct,
        });
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use rust_decimal_macros::dec;

    fn base_income(revenue: Decimal) -> Vec<IncomePeriod> {
        vec![IncomePeriod {
            date: "2023-12-31".into(),
            revenue: Some(revenue),
            ..IncomePeriod::default()
        }]
    }

    #[test]
    fn test_labels_are_sequential() {
        let forecast = build_forecast(
            &base_income(dec!(1000)),
            &ResolvedAssumptions::default(),
            DEFAULT_HORIZON,
        );
        let labels: Vec<&str> = forecast.iter().map(|y| y.label.as_str()).collect();
        assert_eq!(labels, vec!["FY+1", "FY+2", "FY+3", "FY+4", "FY+5"]);
    }

    #[test]
    fn test_revenue_compounds() {
        let a = Assumptions {
            revenue_growth: Some(dec!(0.10)),
            ..Assumptions::default()
        }
        .resolve();
        let forecast = build_forecast(&base_income(dec!(1000)), &a, 3);

        assert_eq!(forecast[0].revenue, dec!(1100));
        assert_eq!(forecast[1].revenue, dec!(1210));
        assert_eq!(forecast[2].revenue, dec!(1331));
    }

    #[test]
    fn test_zero_growth_holds_revenue_constant() {
        let a = Assumptions {
            revenue_growth: Some(Decimal::ZERO),
            ..Assumptions::default()
        }
        .resolve();
        let forecast = build_forecast(&base_income(dec!(1000)), &a, 5);

        assert!(forecast.iter().all(|y| y.revenue == dec!(1000)));
    }

    #[test]
    fn test_margins_are_fractions_of_period_revenue() {
        let a = Assumptions {
            revenue_growth: Some(Decimal::ZERO),
            ebitda_margin: Some(dec!(0.25)),
            ebit_margin: Some(dec!(0.18)),
            da_pct: Some(dec!(0.03)),
            capex_pct: Some(dec!(0.04)),
            nwc_pct: Some(dec!(0.02)),
            ..Assumptions::default()
        }
        .resolve();
        let forecast = build_forecast(&base_income(dec!(1000)), &a, 1);
        let y1 = &forecast[0];

        assert_eq!(y1.ebitda, dec!(250));
        assert_eq!(y1.ebit, dec!(180));
        assert_eq!(y1.da, dec!(30));
        assert_eq!(y1.capex, dec!(40));
        assert_eq!(y1.nwc, dec!(20));
    }

    #[test]
    fn test_missing_seed_revenue_projects_zero() {
        let forecast = build_forecast(&[], &ResolvedAssumptions::default(), 3);
        assert_eq!(forecast.len(), 3);
        assert!(forecast.iter().all(|y| y.revenue == Decimal::ZERO));
    }
}
