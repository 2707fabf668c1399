//! Debt-to-equity.

use screen_core::{AnnualFinancialSeries, LineItem, SummaryInfo};
use tracing::debug;

use crate::resolve::TOTAL_DEBT;
use crate::verdict::{Criterion, Rejection, Verdict};

/// Reported values above this are read as percentages.
pub const PERCENT_HEURISTIC_CUTOFF: f64 = 5.0;

/// Normalizes a provider-reported debt-to-equity value to a plain ratio.
///
/// Providers disagree on units, so anything above
/// [`PERCENT_HEURISTIC_CUTOFF`] is assumed to be a percentage and divided by
/// 100. This is a heuristic: a genuine ratio above 5 will be misread.
#[must_use]
pub fn normalize_reported_debt_to_equity(raw: f64) -> f64 {
    if raw > PERCENT_HEURISTIC_CUTOFF {
        raw / 100.0
    } else {
        raw
    }
}

/// Resolves the debt-to-equity ratio.
///
/// The reported value wins when present. Otherwise total debt comes from
/// [`TOTAL_DEBT`] and is divided by the most recent shareholder equity.
pub fn debt_to_equity(
    balance_sheet: Option<&AnnualFinancialSeries>,
    info: Option<&SummaryInfo>,
) -> Result<f64, Rejection> {
    if let Some(raw) = info.and_then(SummaryInfo::debt_to_equity) {
        return Ok(normalize_reported_debt_to_equity(raw));
    }

    let sheet = balance_sheet
        .filter(|s| !s.is_empty())
        .ok_or(Rejection::BalanceSheetUnavailable)?;

    let debt = TOTAL_DEBT.resolve(sheet).ok_or(Rejection::DebtUnresolved)?;
    let equity = sheet
        .latest(LineItem::TotalStockholderEquity)
        .ok_or(Rejection::ValueMissing(LineItem::TotalStockholderEquity))?;
    if equity == 0.0 {
        return Err(Rejection::ZeroEquity { metric: "D/E" });
    }

    let ratio = debt.value / equity;
    if !ratio.is_finite() {
        return Err(Rejection::NonFinite { metric: "D/E" });
    }
    debug!(debt = debt.value, via = debt.strategy, equity, ratio, "Computed D/E");
    Ok(ratio)
}

/// Checks that debt-to-equity is strictly below `ceiling`.
#[must_use]
pub fn check_leverage(
    balance_sheet: Option<&AnnualFinancialSeries>,
    info: Option<&SummaryInfo>,
    ceiling: f64,
) -> Verdict {
    let result = debt_to_equity(balance_sheet, info).and_then(|ratio| {
        if ratio < ceiling {
            Ok(())
        } else {
            Err(Rejection::HighDebt { ratio, ceiling })
        }
    });
    Verdict::from_result(Criterion::Leverage, result)
}

/// Returns true if [`check_leverage`] passes.
#[must_use]
pub fn has_low_debt(
    balance_sheet: Option<&AnnualFinancialSeries>,
    info: Option<&SummaryInfo>,
    ceiling: f64,
) -> bool {
    check_leverage(balance_sheet, info, ceiling).passed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reported(debt_to_equity: f64) -> SummaryInfo {
        SummaryInfo {
            debt_to_equity: Some(debt_to_equity),
            ..SummaryInfo::default()
        }
    }

    fn balance(debt: Option<f64>, equity: Option<f64>) -> AnnualFinancialSeries {
        AnnualFinancialSeries::new()
            .with_item(LineItem::TotalDebt, [debt])
            .with_item(LineItem::TotalStockholderEquity, [equity])
    }

    #[test]
    fn test_reported_percentage_is_normalized() {
        assert_eq!(normalize_reported_debt_to_equity(45.0), 0.45);
        assert_eq!(normalize_reported_debt_to_equity(5.0), 5.0);
        assert_eq!(normalize_reported_debt_to_equity(0.8), 0.8);

        assert!(has_low_debt(None, Some(&reported(45.0)), 1.0));
        assert!(!has_low_debt(None, Some(&reported(150.0)), 1.0));
    }

    #[test]
    fn test_reported_value_takes_priority() {
        let sheet = balance(Some(900.0), Some(100.0));
        assert!(has_low_debt(Some(&sheet), Some(&reported(0.4)), 1.0));
    }

    #[test]
    fn test_non_finite_reported_value_falls_back() {
        let sheet = balance(Some(50.0), Some(100.0));
        let info = reported(f64::NAN);
        assert_eq!(debt_to_equity(Some(&sheet), Some(&info)), Ok(0.5));
    }

    #[test]
    fn test_computed_ratio() {
        let sheet = balance(Some(50.0), Some(100.0));
        assert!(has_low_debt(Some(&sheet), None, 1.0));

        let heavy = balance(Some(150.0), Some(100.0));
        let verdict = check_leverage(Some(&heavy), None, 1.0);
        assert_eq!(
            verdict.rejections,
            vec![Rejection::HighDebt {
                ratio: 1.5,
                ceiling: 1.0
            }]
        );
    }

    #[test]
    fn test_ratio_equal_to_ceiling_fails() {
        let sheet = balance(Some(100.0), Some(100.0));
        assert!(!has_low_debt(Some(&sheet), None, 1.0));
    }

    #[test]
    fn test_zero_equity_fails_regardless_of_debt() {
        for debt in [0.0, 1.0, 1e9, -5.0] {
            let sheet = balance(Some(debt), Some(0.0));
            assert!(!has_low_debt(Some(&sheet), None, f64::MAX));
        }
    }

    #[test]
    fn test_monotonic_in_ceiling() {
        let sheet = balance(Some(80.0), Some(100.0));
        let ceilings = [0.1, 0.5, 0.8, 0.81, 1.0, 2.0];
        let outcomes: Vec<bool> = ceilings
            .iter()
            .map(|c| has_low_debt(Some(&sheet), None, *c))
            .collect();
        assert_eq!(outcomes, vec![false, false, false, true, true, true]);
        assert!(outcomes.windows(2).all(|w| !w[0] || w[1]));
    }

    #[test]
    fn test_unresolvable_inputs_fail() {
        assert_eq!(
            check_leverage(None, None, 1.0).rejections,
            vec![Rejection::BalanceSheetUnavailable]
        );

        let no_debt = balance(None, Some(100.0));
        assert_eq!(
            check_leverage(Some(&no_debt), None, 1.0).rejections,
            vec![Rejection::DebtUnresolved]
        );

        let no_equity = balance(Some(10.0), None);
        assert_eq!(
            check_leverage(Some(&no_equity), None, 1.0).rejections,
            vec![Rejection::ValueMissing(LineItem::TotalStockholderEquity)]
        );
    }

    #[test]
    fn test_negative_equity_passes() {
        let sheet = balance(Some(50.0), Some(-100.0));
        assert!(has_low_debt(Some(&sheet), None, 1.0));
    }
}
