//! Return on equity and return on capital employed.

use screen_core::{AnnualFinancialSeries, LineItem, SummaryInfo};
use tracing::debug;

use crate::resolve::CAPITAL_EMPLOYED;
use crate::verdict::{Criterion, Rejection, Verdict};

/// Resolves ROE as a fraction.
///
/// The reported value wins when present; otherwise the most recent net income
/// is divided by the most recent shareholder equity.
pub fn return_on_equity(
    income: &AnnualFinancialSeries,
    balance_sheet: &AnnualFinancialSeries,
    info: Option<&SummaryInfo>,
) -> Result<f64, Rejection> {
    if let Some(roe) = info.and_then(SummaryInfo::return_on_equity) {
        return Ok(roe);
    }

    let equity = balance_sheet
        .latest(LineItem::TotalStockholderEquity)
        .ok_or(Rejection::ValueMissing(LineItem::TotalStockholderEquity))?;
    if equity == 0.0 {
        return Err(Rejection::ZeroEquity { metric: "ROE" });
    }
    let net_income = income
        .latest(LineItem::NetIncome)
        .ok_or(Rejection::ValueMissing(LineItem::NetIncome))?;

    let roe = net_income / equity;
    if !roe.is_finite() {
        return Err(Rejection::NonFinite { metric: "ROE" });
    }
    Ok(roe)
}

/// Computes ROCE as a fraction: most recent EBIT over capital employed.
///
/// Never taken from reported metrics.
pub fn return_on_capital_employed(
    income: &AnnualFinancialSeries,
    balance_sheet: &AnnualFinancialSeries,
) -> Result<f64, Rejection> {
    let capital_employed = CAPITAL_EMPLOYED
        .resolve(balance_sheet)
        .ok_or(Rejection::CapitalEmployedUnresolved)?;
    let ebit = income
        .latest(LineItem::Ebit)
        .ok_or(Rejection::ValueMissing(LineItem::Ebit))?;

    let roce = ebit / capital_employed.value;
    if !roce.is_finite() {
        return Err(Rejection::NonFinite { metric: "ROCE" });
    }
    debug!(
        ebit,
        capital_employed = capital_employed.value,
        via = capital_employed.strategy,
        roce,
        "Computed ROCE"
    );
    Ok(roce)
}

/// Checks that ROE and ROCE are both strictly above their floors.
///
/// Both statements are required. Every failing sub-check is reported.
#[must_use]
pub fn check_returns(
    income: Option<&AnnualFinancialSeries>,
    balance_sheet: Option<&AnnualFinancialSeries>,
    info: Option<&SummaryInfo>,
    roe_floor: f64,
    roce_floor: f64,
) -> Verdict {
    let Some(income) = income.filter(|s| !s.is_empty()) else {
        return Verdict::fail(Criterion::Returns, Rejection::IncomeUnavailable);
    };
    let Some(balance_sheet) = balance_sheet.filter(|s| !s.is_empty()) else {
        return Verdict::fail(Criterion::Returns, Rejection::BalanceSheetUnavailable);
    };

    let roe = return_on_equity(income, balance_sheet, info).and_then(|roe| {
        if roe > roe_floor {
            Ok(())
        } else {
            Err(Rejection::LowRoe {
                roe,
                floor: roe_floor,
            })
        }
    });
    let roce = return_on_capital_employed(income, balance_sheet).and_then(|roce| {
        if roce > roce_floor {
            Ok(())
        } else {
            Err(Rejection::LowRoce {
                roce,
                floor: roce_floor,
            })
        }
    });

    Verdict {
        criterion: Criterion::Returns,
        rejections: [roe, roce].into_iter().filter_map(Result::err).collect(),
    }
}

/// Returns true if [`check_returns`] passes.
#[must_use]
pub fn has_good_returns(
    income: Option<&AnnualFinancialSeries>,
    balance_sheet: Option<&AnnualFinancialSeries>,
    info: Option<&SummaryInfo>,
    roe_floor: f64,
    roce_floor: f64,
) -> bool {
    check_returns(income, balance_sheet, info, roe_floor, roce_floor).passed()
}
