//! Field extraction rules for live payloads.
//!
//! Each canonical field has an explicit, prioritized list of legacy source
//! keys, evaluated in declared order. Values may arrive as plain JSON
//! numbers or wrapped as `{ "raw": n }`; statement modules may sit directly
//! under their key or be wrapped under a `result[0]` array. Both
//! conventions are accepted for every list.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

// --- Income statement ---
pub(crate) const REVENUE: &[&str] = &["totalRevenue"];
pub(crate) const GROSS_PROFIT: &[&str] = &["grossProfit"];
pub(crate) const EBIT: &[&str] = &["ebit"];
pub(crate) const EBITDA: &[&str] = &["ebitda"];
pub(crate) const INCOME_DEPRECIATION: &[&str] = &["depreciation"];
pub(crate) const INTEREST_EXPENSE: &[&str] = &["interestExpense"];
pub(crate) const PRETAX_INCOME: &[&str] = &["incomeBeforeTax"];
pub(crate) const TAX_EXPENSE: &[&str] = &["incomeTaxExpense"];
pub(crate) const NET_INCOME: &[&str] = &["netIncome"];

// --- Balance sheet ---
pub(crate) const CASH: &[&str] = &["cash", "cashAndCashEquivalents"];
pub(crate) const TOTAL_CURRENT_ASSETS: &[&str] = &["totalCurrentAssets"];
pub(crate) const TOTAL_ASSETS: &[&str] = &["totalAssets"];
pub(crate) const TOTAL_CURRENT_LIABILITIES: &[&str] = &["totalCurrentLiabilities"];
pub(crate) const TOTAL_LIABILITIES: &[&str] = &["totalLiabilities"];
pub(crate) const SHORT_TERM_DEBT: &[&str] = &["shortLongTermDebt", "shortTermDebt"];
pub(crate) const LONG_TERM_DEBT: &[&str] = &["longTermDebt"];
pub(crate) const TOTAL_DEBT: &[&str] = &["totalDebt"];
pub(crate) const TOTAL_EQUITY: &[&str] = &["totalStockholderEquity"];
pub(crate) const SHARES_OUTSTANDING: &[&str] = &["shareIssued", "sharesOutstanding"];

// --- Cash flow statement ---
pub(crate) const OPERATING_CASH_FLOW: &[&str] =
    &["totalCashFromOperatingActivities", "operatingCashFlow"];
pub(crate) const CAPEX: &[&str] = &["capitalExpenditures", "capitalExpenditure"];
pub(crate) const FREE_CASH_FLOW: &[&str] = &["freeCashFlow"];
pub(crate) const CASHFLOW_DEPRECIATION: &[&str] =
    &["depreciation", "depreciationAndAmortization"];
pub(crate) const DIVIDENDS_PAID: &[&str] = &["dividendsPaid"];

/// Try each source key in order; first key with a usable numeric value wins.
pub(crate) fn extract(item: &Value, keys: &[&str]) -> Option<Decimal> {
    keys.iter().find_map(|key| numeric(item.get(*key)?))
}

/// Coerce a payload value to `Decimal`. Accepts a plain number or the
/// legacy `{ "raw": n }` wrapper; anything else (null, strings, objects
/// without `raw`) is unknown.
pub(crate) fn numeric(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => decimal_from_number(n),
        Value::Object(map) => match map.get("raw") {
            Some(Value::Number(n)) => decimal_from_number(n),
            _ => None,
        },
        _ => None,
    }
}

fn decimal_from_number(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        Some(Decimal::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(Decimal::from(u))
    } else {
        n.as_f64().and_then(Decimal::from_f64)
    }
}

/// Peel a legacy `{ "result": [first, ...] }` wrapper if present.
pub(crate) fn unwrap_result(value: &Value) -> &Value {
    value
        .get("result")
        .and_then(|r| r.get(0))
        .unwrap_or(value)
}

/// Locate a statement list: `summary.<module>.<list_key>`, with the module
/// object itself possibly wrapped under `result[0]`.
pub(crate) fn statement_items<'a>(
    summary: &'a Value,
    module: &str,
    list_key: &str,
) -> &'a [Value] {
    summary
        .get(module)
        .map(unwrap_result)
        .and_then(|m| m.get(list_key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Period end date: `endDate.fmt`, a plain `endDate`/`date` string, or "N/A".
pub(crate) fn period_date(item: &Value) -> String {
    let end_date = item.get("endDate");
    if let Some(fmt) = end_date
        .and_then(|d| d.get("fmt"))
        .and_then(Value::as_str)
    {
        return fmt.to_string();
    }
    if let Some(s) = end_date.and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(s) = item.get("date").and_then(Value::as_str) {
        return s.to_string();
    }
    "N/A".to_string()
}
