//! Canonical financial-statement records.
//!
//! One instance per reporting period, most recent first. Every numeric field
//! is either a known finite `Decimal` or an explicit `None` ("unknown");
//! records are produced once by the normalization engine and never mutated
//! afterward.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// One income-statement period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomePeriod {
    pub date: String,
    pub revenue: Option<Money>,
    pub gross_profit: Option<Money>,
    pub ebit: Option<Money>,
    pub ebitda: Option<Money>,
    pub interest_expense: Option<Money>,
    pub pretax_income: Option<Money>,
    pub tax_expense: Option<Money>,
    pub net_income: Option<Money>,
}

/// One balance-sheet period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalancePeriod {
    pub date: String,
    pub cash: Option<Money>,
    pub total_current_assets: Option<Money>,
    pub total_assets: Option<Money>,
    pub total_current_liabilities: Option<Money>,
    pub total_liabilities: Option<Money>,
    pub short_term_debt: Option<Money>,
    pub long_term_debt: Option<Money>,
    pub total_debt: Option<Money>,
    pub total_equity: Option<Money>,
    pub shares_outstanding: Option<Decimal>,
}

/// One cash-flow-statement period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashflowPeriod {
    pub date: String,
    pub operating_cash_flow: Option<Money>,
    pub capex: Option<Money>,
    pub free_cash_flow: Option<Money>,
    pub depreciation_amortization: Option<Money>,
    pub dividends_paid: Option<Money>,
}

/// One trading day with a known close. Days with no close are dropped at
/// normalization, not zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Money,
}

/// Security metadata. The currency is a pass-through label; no conversion
/// happens anywhere in the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMeta {
    pub currency: String,
    pub long_name: String,
}

impl Default for CompanyMeta {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            long_name: "Unknown".into(),
        }
    }
}

/// The canonical output of normalization: statement sequences (most recent
/// first), the price series, and metadata. The sole data source for every
/// downstream model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizedStatements {
    pub income_annual: Vec<IncomePeriod>,
    pub income_quarterly: Vec<IncomePeriod>,
    pub balance_annual: Vec<BalancePeriod>,
    pub balance_quarterly: Vec<BalancePeriod>,
    pub cashflow_annual: Vec<CashflowPeriod>,
    pub cashflow_quarterly: Vec<CashflowPeriod>,
    pub prices: Vec<PricePoint>,
    pub meta: CompanyMeta,
}

/// A demo dataset is already canonical; normalization passes it through
/// without key reconciliation and with zero warnings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoDataset {
    pub income_annual: Vec<IncomePeriod>,
    pub income_quarterly: Vec<IncomePeriod>,
    pub balance_annual: Vec<BalancePeriod>,
    pub balance_quarterly: Vec<BalancePeriod>,
    pub cashflow_annual: Vec<CashflowPeriod>,
    pub cashflow_quarterly: Vec<CashflowPeriod>,
    pub prices: Vec<PricePoint>,
    pub meta: CompanyMeta,
}
