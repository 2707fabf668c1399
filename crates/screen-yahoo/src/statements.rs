//! Quote summary response types and their conversion into statement series.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use screen_core::{AnnualFinancialSeries, FinancialRecords, LineItem, SummaryInfo};
use serde::Deserialize;
use serde_json::Value;

/// Modules requested from the quote summary endpoint.
pub(crate) const SUMMARY_MODULES: &str = "incomeStatementHistory,balanceSheetHistory,financialData";

/// Income statement fields and the line items they populate.
const INCOME_FIELDS: &[(&str, LineItem)] = &[
    ("netIncome", LineItem::NetIncome),
    ("ebit", LineItem::Ebit),
];

/// Balance sheet fields and the line items they populate.
const BALANCE_FIELDS: &[(&str, LineItem)] = &[
    ("totalDebt", LineItem::TotalDebt),
    ("longTermDebt", LineItem::LongTermDebt),
    ("shortLongTermDebt", LineItem::ShortLongTermDebt),
    ("totalStockholderEquity", LineItem::TotalStockholderEquity),
    ("totalAssets", LineItem::TotalAssets),
    ("totalCurrentLiabilities", LineItem::TotalCurrentLiabilities),
];

/// Quote Summary API response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteSummaryResponse {
    pub(crate) quote_summary: QuoteSummaryResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteSummaryResult {
    #[serde(default)]
    pub(crate) result: Option<Vec<QuoteSummaryData>>,
    #[serde(default)]
    pub(crate) error: Option<SummaryError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryError {
    pub(crate) code: String,
    #[serde(default)]
    pub(crate) description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteSummaryData {
    income_statement_history: Option<IncomeStatementHistory>,
    balance_sheet_history: Option<BalanceSheetHistory>,
    financial_data: Option<FinancialData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomeStatementHistory {
    #[serde(default)]
    income_statement_history: Vec<HashMap<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceSheetHistory {
    #[serde(default)]
    balance_sheet_statements: Vec<HashMap<String, Value>>,
}

/// Yahoo wraps numbers as `{"raw": 1.0, "fmt": "1.00"}`; missing values are `{}`.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    #[serde(default)]
    debt_to_equity: RawValue,
    #[serde(default)]
    return_on_equity: RawValue,
}

impl QuoteSummaryData {
    /// Converts the response modules into records; absent modules stay `None`.
    pub(crate) fn into_records(self) -> FinancialRecords {
        let income = self
            .income_statement_history
            .and_then(|h| build_series(h.income_statement_history, INCOME_FIELDS));
        let balance_sheet = self
            .balance_sheet_history
            .and_then(|h| build_series(h.balance_sheet_statements, BALANCE_FIELDS));

        let info = self.financial_data.map(|fd| SummaryInfo {
            debt_to_equity: fd.debt_to_equity.raw,
            return_on_equity: fd.return_on_equity.raw,
        });

        FinancialRecords {
            info,
            income,
            balance_sheet,
        }
    }
}

/// Extracts the `raw` number of a wrapped field.
fn raw_number(statement: &HashMap<String, Value>, field: &str) -> Option<f64> {
    statement.get(field)?.get("raw")?.as_f64()
}

/// Fiscal period end of a statement, from its `endDate` epoch seconds.
fn end_date(statement: &HashMap<String, Value>) -> Option<NaiveDate> {
    let raw = statement.get("endDate")?.get("raw")?.as_i64()?;
    DateTime::from_timestamp(raw, 0).map(|dt| dt.date_naive())
}

/// Builds a most-recent-first series from per-period statements.
///
/// A line item is included only when at least one period carries its field,
/// so a field the provider never reports stays distinguishable from a
/// reported-but-empty value.
fn build_series(
    mut statements: Vec<HashMap<String, Value>>,
    fields: &[(&str, LineItem)],
) -> Option<AnnualFinancialSeries> {
    if statements.is_empty() {
        return None;
    }

    // Newest first; undated statements keep their relative order at the end.
    statements.sort_by(|a, b| end_date(b).cmp(&end_date(a)));

    let mut series = AnnualFinancialSeries::new();

    for (field, item) in fields {
        if statements.iter().any(|s| s.contains_key(*field)) {
            let values: Vec<Option<f64>> =
                statements.iter().map(|s| raw_number(s, field)).collect();
            series = series.with_item(*item, values);
        }
    }

    Some(series)
}
