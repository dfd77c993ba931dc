//! Normalization engine.
//!
//! Maps a raw upstream payload (live market-data proxy shape, or an
//! already-canonical demo dataset) into [`NormalizedStatements`]. Missing
//! required fields and applied derivations surface as warnings in the output
//! envelope; nothing here ever aborts the caller. Normalization is a pure
//! function of its input: identical payloads yield identical canonical
//! output and an identical warning sequence.

pub mod record;
mod rules;

pub use record::{
    BalancePeriod, CashflowPeriod, CompanyMeta, DemoDataset, IncomePeriod, NormalizedStatements,
    PricePoint,
};

use chrono::DateTime;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::num::{opt_add, sum_known};
use crate::types::{with_metadata, ComputationOutput};
use crate::EqvalResult;

/// Where a payload came from. Live payloads go through key reconciliation;
/// demo payloads are trusted as canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Demo,
}

/// Normalize a raw payload from the given source.
pub fn normalize(
    payload: &Value,
    source: DataSource,
) -> EqvalResult<ComputationOutput<NormalizedStatements>> {
    match source {
        DataSource::Live => Ok(normalize_live(payload)),
        DataSource::Demo => {
            let demo: DemoDataset = serde_json::from_value(payload.clone())?;
            Ok(normalize_demo(&demo))
        }
    }
}

/// Normalize a live payload shaped as `{ summary: {...}, chart: {...} }`.
///
/// Warning order is fixed: income, then balance, then cash flow, with the
/// annual list before the quarterly list in each group, rows in payload
/// order, and within a row any derivation note before the missing-field
/// notes.
pub fn normalize_live(payload: &Value) -> ComputationOutput<NormalizedStatements> {
    let mut warnings: Vec<String> = Vec::new();

    let summary = module_root(payload.get("summary"), "quoteSummary");
    let chart = module_root(payload.get("chart"), "chart");

    let income_annual = map_periods(
        summary,
        "incomeStatementHistory",
        "incomeStatementHistory",
        &mut warnings,
        map_income,
    );
    let income_quarterly = map_periods(
        summary,
        "incomeStatementHistoryQuarterly",
        "incomeStatementHistory",
        &mut warnings,
        map_income,
    );
    let balance_annual = map_periods(
        summary,
        "balanceSheetHistory",
        "balanceSheetStatements",
        &mut warnings,
        map_balance,
    );
    let balance_quarterly = map_periods(
        summary,
        "balanceSheetHistoryQuarterly",
        "balanceSheetStatements",
        &mut warnings,
        map_balance,
    );
    let cashflow_annual = map_periods(
        summary,
        "cashflowStatementHistory",
        "cashflowStatements",
        &mut warnings,
        map_cashflow,
    );
    let cashflow_quarterly = map_periods(
        summary,
        "cashflowStatementHistoryQuarterly",
        "cashflowStatements",
        &mut warnings,
        map_cashflow,
    );

    let result = NormalizedStatements {
        income_annual,
        income_quarterly,
        balance_annual,
        balance_quarterly,
        cashflow_annual,
        cashflow_quarterly,
        prices: map_prices(chart),
        meta: map_meta(summary),
    };

    with_metadata(
        "Live payload normalization (prioritized key reconciliation)",
        &json!({ "source": "live" }),
        warnings,
        result,
    )
}

/// Pass a demo dataset through unchanged. Always yields zero warnings.
pub fn normalize_demo(demo: &DemoDataset) -> ComputationOutput<NormalizedStatements> {
    let result = NormalizedStatements {
        income_annual: demo.income_annual.clone(),
        income_quarterly: demo.income_quarterly.clone(),
        balance_annual: demo.balance_annual.clone(),
        balance_quarterly: demo.balance_quarterly.clone(),
        cashflow_annual: demo.cashflow_annual.clone(),
        cashflow_quarterly: demo.cashflow_quarterly.clone(),
        prices: demo.prices.clone(),
        meta: demo.meta.clone(),
    };

    with_metadata(
        "Demo dataset pass-through",
        &json!({ "source": "demo" }),
        Vec::new(),
        result,
    )
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Resolve the root object of a payload half, peeling an optional service
/// wrapper key and an optional legacy `result[0]` nesting.
fn module_root<'a>(value: Option<&'a Value>, wrapper_key: &str) -> &'a Value {
    let value = value.unwrap_or(&Value::Null);
    let value = value.get(wrapper_key).unwrap_or(value);
    rules::unwrap_result(value)
}

fn map_periods<T>(
    summary: &Value,
    module: &str,
    list_key: &str,
    warnings: &mut Vec<String>,
    mapper: fn(&Value, String, &mut Vec<String>) -> T,
) -> Vec<T> {
    rules::statement_items(summary, module, list_key)
        .iter()
        .map(|item| mapper(item, rules::period_date(item), warnings))
        .collect()
}

fn map_income(item: &Value, date: String, warnings: &mut Vec<String>) -> IncomePeriod {
    let revenue = rules::extract(item, rules::REVENUE);
    let gross_profit = rules::extract(item, rules::GROSS_PROFIT);
    let ebit = rules::extract(item, rules::EBIT);

    // EBITDA fallback: EBIT + D&A when both are known, else stays unknown.
    // Never coerced to zero; downstream models treat None as insufficient
    // data.
    let ebitda_direct = rules::extract(item, rules::EBITDA);
    let depreciation = rules::extract(item, rules::INCOME_DEPRECIATION);
    let ebitda = ebitda_direct.or(opt_add(ebit, depreciation));
    if ebitda_direct.is_none() && ebitda.is_some() {
        warnings.push("Derived EBITDA from EBIT + D&A".to_string());
    }

    let interest_expense = rules::extract(item, rules::INTEREST_EXPENSE);
    let pretax_income = rules::extract(item, rules::PRETAX_INCOME);
    let tax_expense = rules::extract(item, rules::TAX_EXPENSE);
    let net_income = rules::extract(item, rules::NET_INCOME);

    warn_missing(
        warnings,
        "Income statement",
        &[
            ("revenue", revenue),
            ("grossProfit", gross_profit),
            ("ebit", ebit),
            ("netIncome", net_income),
        ],
    );

    IncomePeriod {
        date,
        revenue,
        gross_profit,
        ebit,
        ebitda,
        interest_expense,
        pretax_income,
        tax_expense,
        net_income,
    }
}

fn map_balance(item: &Value, date: String, warnings: &mut Vec<String>) -> BalancePeriod {
    let cash = rules::extract(item, rules::CASH);
    let total_current_assets = rules::extract(item, rules::TOTAL_CURRENT_ASSETS);
    let total_assets = rules::extract(item, rules::TOTAL_ASSETS);
    let total_current_liabilities = rules::extract(item, rules::TOTAL_CURRENT_LIABILITIES);
    let total_liabilities = rules::extract(item, rules::TOTAL_LIABILITIES);
    let short_term_debt = rules::extract(item, rules::SHORT_TERM_DEBT);
    let long_term_debt = rules::extract(item, rules::LONG_TERM_DEBT);

    // Total debt may arrive as an explicit aggregate or need summing from
    // the components that are present.
    let total_debt_direct = rules::extract(item, rules::TOTAL_DEBT);
    let total_debt = total_debt_direct.or_else(|| sum_known(&[short_term_debt, long_term_debt]));
    if total_debt_direct.is_none() && total_debt.is_some() {
        warnings.push("Derived total debt from short + long term debt".to_string());
    }

    let total_equity = rules::extract(item, rules::TOTAL_EQUITY);
    let shares_outstanding = rules::extract(item, rules::SHARES_OUTSTANDING);

    warn_missing(
        warnings,
        "Balance sheet",
        &[
            ("cash", cash),
            ("totalAssets", total_assets),
            ("totalLiabilities", total_liabilities),
            ("totalEquity", total_equity),
        ],
    );

    BalancePeriod {
        date,
        cash,
        total_current_assets,
        total_assets,
        total_current_liabilities,
        total_liabilities,
        short_term_debt,
        long_term_debt,
        total_debt,
        total_equity,
        shares_outstanding,
    }
}

fn map_cashflow(item: &Value, date: String, warnings: &mut Vec<String>) -> CashflowPeriod {
    let operating_cash_flow = rules::extract(item, rules::OPERATING_CASH_FLOW);
    let capex = rules::extract(item, rules::CAPEX);

    // Capex arrives signed, so FCF is the plain sum of the two lines.
    let fcf_direct = rules::extract(item, rules::FREE_CASH_FLOW);
    let free_cash_flow = fcf_direct.or(opt_add(operating_cash_flow, capex));
    if fcf_direct.is_none() && free_cash_flow.is_some() {
        warnings.push("Derived FCF from operating cash flow + capex".to_string());
    }

    let depreciation_amortization = rules::extract(item, rules::CASHFLOW_DEPRECIATION);
    let dividends_paid = rules::extract(item, rules::DIVIDENDS_PAID);

    warn_missing(
        warnings,
        "Cash flow",
        &[
            ("operatingCashFlow", operating_cash_flow),
            ("capex", capex),
            ("freeCashFlow", free_cash_flow),
        ],
    );

    CashflowPeriod {
        date,
        operating_cash_flow,
        capex,
        free_cash_flow,
        depreciation_amortization,
        dividends_paid,
    }
}

fn warn_missing(warnings: &mut Vec<String>, label: &str, fields: &[(&str, Option<Decimal>)]) {
    for (name, value) in fields {
        if value.is_none() {
            warnings.push(format!("{label}: Missing {name}"));
        }
    }
}

/// Pair epoch-second timestamps with closes; days with a null close are
/// dropped, not zero-filled.
fn map_prices(chart: &Value) -> Vec<PricePoint> {
    let timestamps = chart
        .get("timestamp")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let closes = chart
        .get("indicators")
        .and_then(|i| i.get("quote"))
        .and_then(|q| q.get(0))
        .and_then(|q| q.get("close"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    timestamps
        .iter()
        .enumerate()
        .filter_map(|(idx, ts)| {
            let close = rules::numeric(closes.get(idx)?)?;
            let date = DateTime::from_timestamp(ts.as_i64()?, 0)?.date_naive();
            Some(PricePoint { date, close })
        })
        .collect()
}

fn map_meta(summary: &Value) -> CompanyMeta {
    let price = rules::unwrap_result(summary.get("price").unwrap_or(&Value::Null));
    let currency = price
        .get("currency")
        .and_then(Value::as_str)
        .unwrap_or("USD");
    let long_name = price
        .get("longName")
        .and_then(Value::as_str)
        .or_else(|| price.get("shortName").and_then(Value::as_str))
        .unwrap_or("Unknown");

    CompanyMeta {
        currency: currency.to_string(),
        long_name: long_name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    /// A complete single-year live payload with well-formed fields.
    fn sample_live_payload() -> Value {
        json!({
            "summary": {
                "incomeStatementHistory": {
                    "incomeStatementHistory": [{
                        "endDate": {"fmt": "2023-12-31"},
                        "totalRevenue": {"raw": 1000},
                        "grossProfit": {"raw": 400},
                        "ebit": {"raw": 180},
                        "ebitda": {"raw": 230},
                        "interestExpense": {"raw": -20},
                        "incomeBeforeTax": {"raw": 160},
                        "incomeTaxExpense": {"raw": 37},
                        "netIncome": {"raw": 123}
                    }]
                },
                "balanceSheetHistory": {
                    "balanceSheetStatements": [{
                        "endDate": {"fmt": "2023-12-31"},
                        "cash": {"raw": 150},
                        "totalCurrentAssets": {"raw": 450},
                        "totalAssets": {"raw": 1200},
                        "totalCurrentLiabilities": {"raw": 300},
                        "totalLiabilities": {"raw": 700},
                        "shortLongTermDebt": {"raw": 10},
                        "longTermDebt": {"raw": 20},
                        "totalStockholderEquity": {"raw": 500},
                        "shareIssued": {"raw": 100}
                    }]
                },
                "cashflowStatementHistory": {
                    "cashflowStatements": [{
                        "endDate": {"fmt": "2023-12-31"},
                        "totalCashFromOperatingActivities": {"raw": 200},
                        "capitalExpenditures": {"raw": -50},
                        "depreciation": {"raw": 50},
                        "dividendsPaid": {"raw": -30}
                    }]
                },
                "price": {
                    "currency": "USD",
                    "longName": "Sample Industries Inc."
                }
            },
            "chart": {
                "timestamp": [1704067200, 1704153600, 1704240000],
                "indicators": {
                    "quote": [{"close": [101.5, null, 103.25]}]
                }
            }
        })
    }

    #[test]
    fn test_derived_total_debt_single_warning() {
        let out = normalize_live(&sample_live_payload());
        let balance = &out.result.balance_annual[0];

        assert_eq!(balance.total_debt, Some(dec!(30)));
        assert_eq!(
            out.warnings
                .iter()
                .filter(|w| w.contains("Derived total debt"))
                .count(),
            1
        );
        assert!(!out.warnings.iter().any(|w| w.contains("totalDebt")));
    }

    #[test]
    fn test_direct_total_debt_is_not_derived() {
        let mut payload = sample_live_payload();
        payload["summary"]["balanceSheetHistory"]["balanceSheetStatements"][0]["totalDebt"] =
            json!({"raw": 45});

        let out = normalize_live(&payload);
        assert_eq!(out.result.balance_annual[0].total_debt, Some(dec!(45)));
        assert!(!out.warnings.iter().any(|w| w.contains("Derived total debt")));
    }

    #[test]
    fn test_ebitda_derived_from_ebit_plus_da() {
        let mut payload = sample_live_payload();
        let row = &mut payload["summary"]["incomeStatementHistory"]["incomeStatementHistory"][0];
        row.as_object_mut().unwrap().remove("ebitda");
        row["depreciation"] = json!({"raw": 50});

        let out = normalize_live(&payload);
        assert_eq!(out.result.income_annual[0].ebitda, Some(dec!(230)));
        assert!(out
            .warnings
            .iter()
            .any(|w| w == "Derived EBITDA from EBIT + D&A"));
    }

    #[test]
    fn test_ebitda_stays_unknown_without_depreciation() {
        let mut payload = sample_live_payload();
        let row = &mut payload["summary"]["incomeStatementHistory"]["incomeStatementHistory"][0];
        row.as_object_mut().unwrap().remove("ebitda");

        let out = normalize_live(&payload);
        // None, not zero: downstream treats it as insufficient data
        assert_eq!(out.result.income_annual[0].ebitda, None);
        assert!(!out.warnings.iter().any(|w| w.contains("Derived EBITDA")));
    }

    #[test]
    fn test_missing_required_fields_warn() {
        let mut payload = sample_live_payload();
        let row = &mut payload["summary"]["incomeStatementHistory"]["incomeStatementHistory"][0];
        row.as_object_mut().unwrap().remove("totalRevenue");
        row.as_object_mut().unwrap().remove("netIncome");

        let out = normalize_live(&payload);
        assert_eq!(out.result.income_annual[0].revenue, None);
        assert!(out
            .warnings
            .iter()
            .any(|w| w == "Income statement: Missing revenue"));
        assert!(out
            .warnings
            .iter()
            .any(|w| w == "Income statement: Missing netIncome"));
    }

    #[test]
    fn test_optional_fields_missing_silently() {
        let mut payload = sample_live_payload();
        let row = &mut payload["summary"]["incomeStatementHistory"]["incomeStatementHistory"][0];
        row.as_object_mut().unwrap().remove("interestExpense");

        let out = normalize_live(&payload);
        assert_eq!(out.result.income_annual[0].interest_expense, None);
        assert!(!out.warnings.iter().any(|w| w.contains("interestExpense")));
    }

    #[test]
    fn test_warning_group_order() {
        let mut payload = sample_live_payload();
        payload["summary"]["incomeStatementHistory"]["incomeStatementHistory"][0]
            .as_object_mut()
            .unwrap()
            .remove("totalRevenue");
        payload["summary"]["balanceSheetHistory"]["balanceSheetStatements"][0]
            .as_object_mut()
            .unwrap()
            .remove("cash");
        payload["summary"]["cashflowStatementHistory"]["cashflowStatements"][0]
            .as_object_mut()
            .unwrap()
            .remove("totalCashFromOperatingActivities");

        let out = normalize_live(&payload);
        let income_idx = out
            .warnings
            .iter()
            .position(|w| w.starts_with("Income statement"))
            .unwrap();
        let balance_idx = out
            .warnings
            .iter()
            .position(|w| w.starts_with("Balance sheet"))
            .unwrap();
        let cash_idx = out
            .warnings
            .iter()
            .position(|w| w.starts_with("Cash flow"))
            .unwrap();
        assert!(income_idx < balance_idx);
        assert!(balance_idx < cash_idx);
    }

    #[test]
    fn test_fcf_derived_from_ocf_plus_capex() {
        let out = normalize_live(&sample_live_payload());
        let cf = &out.result.cashflow_annual[0];

        // 200 + (-50), capex arrives signed
        assert_eq!(cf.free_cash_flow, Some(dec!(150)));
        assert!(out
            .warnings
            .iter()
            .any(|w| w == "Derived FCF from operating cash flow + capex"));
    }

    #[test]
    fn test_price_series_drops_null_closes() {
        let out = normalize_live(&sample_live_payload());
        let prices = &out.result.prices;

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].close, dec!(101.5));
        assert_eq!(prices[0].date.to_string(), "2024-01-01");
        assert_eq!(prices[1].close, dec!(103.25));
        assert_eq!(prices[1].date.to_string(), "2024-01-03");
    }

    #[test]
    fn test_meta_extraction_and_fallbacks() {
        let out = normalize_live(&sample_live_payload());
        assert_eq!(out.result.meta.currency, "USD");
        assert_eq!(out.result.meta.long_name, "Sample Industries Inc.");

        let empty = normalize_live(&json!({}));
        assert_eq!(empty.result.meta.currency, "USD");
        assert_eq!(empty.result.meta.long_name, "Unknown");
    }

    #[test]
    fn test_result_wrapped_summary_equivalent_to_bare() {
        let bare = sample_live_payload();
        let mut wrapped = json!({ "chart": bare["chart"].clone() });
        wrapped["summary"] = json!({ "quoteSummary": { "result": [bare["summary"].clone()] } });

        let out_bare = normalize_live(&bare);
        let out_wrapped = normalize_live(&wrapped);
        assert_eq!(out_bare.result, out_wrapped.result);
        assert_eq!(out_bare.warnings, out_wrapped.warnings);
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let payload = sample_live_payload();
        let first = normalize_live(&payload);
        let second = normalize_live(&payload);
        assert_eq!(first, second);
    }

    #[test]
    fn test_demo_source_yields_zero_warnings() {
        let demo = DemoDataset {
            income_annual: vec![IncomePeriod {
                date: "2023-12-31".into(),
                revenue: Some(dec!(1000)),
                ..IncomePeriod::default()
            }],
            ..DemoDataset::default()
        };

        let out = normalize_demo(&demo);
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.income_annual[0].revenue, Some(dec!(1000)));
    }

    #[test]
    fn test_normalize_dispatch_demo_rejects_malformed() {
        let bad = json!({ "incomeAnnual": "not-a-list" });
        let result = normalize(&bad, DataSource::Demo);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_payload_yields_empty_statements() {
        let out = normalize_live(&json!({}));
        assert!(out.result.income_annual.is_empty());
        assert!(out.result.prices.is_empty());
        assert!(out.warnings.is_empty());
    }
}
