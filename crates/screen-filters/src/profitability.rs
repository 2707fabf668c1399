//! Consistent profitability.

use screen_core::{AnnualFinancialSeries, LineItem};

use crate::verdict::{Criterion, Rejection, Verdict};

/// Checks that net income was positive in each of the `years` most recent periods.
///
/// Fails when `years` is zero, the statement is absent, it does not report net
/// income, it covers fewer than `years` periods, or it has a gap inside the
/// window.
#[must_use]
pub fn check_profitability(income: Option<&AnnualFinancialSeries>, years: usize) -> Verdict {
    Verdict::from_result(Criterion::Profitability, profitability(income, years))
}

/// Returns true if [`check_profitability`] passes.
#[must_use]
pub fn is_consistently_profitable(income: Option<&AnnualFinancialSeries>, years: usize) -> bool {
    check_profitability(income, years).passed()
}

fn profitability(income: Option<&AnnualFinancialSeries>, years: usize) -> Result<(), Rejection> {
    if years == 0 {
        return Err(Rejection::EmptyWindow);
    }
    let income = income
        .filter(|s| !s.is_empty())
        .ok_or(Rejection::IncomeUnavailable)?;

    let net_income = income
        .values(LineItem::NetIncome)
        .ok_or(Rejection::MissingLineItem(LineItem::NetIncome))?;

    if net_income.len() < years {
        return Err(Rejection::InsufficientHistory {
            available: net_income.len(),
            needed: years,
        });
    }

    let window = &net_income[..years];
    if window.iter().any(Option::is_none) {
        return Err(Rejection::GapInWindow {
            item: LineItem::NetIncome,
            years,
        });
    }

    let profitable = window.iter().flatten().filter(|v| **v > 0.0).count();
    if profitable < years {
        return Err(Rejection::NotConsistentlyProfitable { profitable, years });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net_income(values: &[Option<f64>]) -> AnnualFinancialSeries {
        AnnualFinancialSeries::new().with_item(LineItem::NetIncome, values.iter().copied())
    }

    #[test]
    fn test_five_profitable_years() {
        let income = net_income(&[
            Some(100.0),
            Some(120.0),
            Some(90.0),
            Some(80.0),
            Some(110.0),
        ]);
        assert!(is_consistently_profitable(Some(&income), 5));
    }

    #[test]
    fn test_one_loss_fails() {
        let income = net_income(&[
            Some(100.0),
            Some(120.0),
            Some(-5.0),
            Some(80.0),
            Some(110.0),
        ]);
        let verdict = check_profitability(Some(&income), 5);
        assert!(!verdict.passed());
        assert_eq!(
            verdict.rejections,
            vec![Rejection::NotConsistentlyProfitable {
                profitable: 4,
                years: 5
            }]
        );
    }

    #[test]
    fn test_zero_income_is_not_profitable() {
        let income = net_income(&[Some(10.0), Some(0.0)]);
        assert!(!is_consistently_profitable(Some(&income), 2));
    }

    #[test]
    fn test_only_window_is_inspected() {
        let income = net_income(&[Some(10.0), Some(20.0), Some(-30.0), None]);
        assert!(is_consistently_profitable(Some(&income), 2));
        assert!(!is_consistently_profitable(Some(&income), 3));
    }

    #[test]
    fn test_short_history_fails() {
        let income = net_income(&[Some(10.0), Some(20.0), Some(30.0)]);
        let verdict = check_profitability(Some(&income), 5);
        assert_eq!(
            verdict.rejections,
            vec![Rejection::InsufficientHistory {
                available: 3,
                needed: 5
            }]
        );
    }

    #[test]
    fn test_gap_in_window_fails() {
        let income = net_income(&[Some(10.0), None, Some(30.0)]);
        let verdict = check_profitability(Some(&income), 3);
        assert!(matches!(
            verdict.rejections[..],
            [Rejection::GapInWindow { years: 3, .. }]
        ));
    }

    #[test]
    fn test_missing_statement_or_line_item_fails() {
        assert_eq!(
            check_profitability(None, 5).rejections,
            vec![Rejection::IncomeUnavailable]
        );
        assert_eq!(
            check_profitability(Some(&AnnualFinancialSeries::new()), 5).rejections,
            vec![Rejection::IncomeUnavailable]
        );

        let ebit_only = AnnualFinancialSeries::new().with_item(LineItem::Ebit, [Some(1.0)]);
        assert_eq!(
            check_profitability(Some(&ebit_only), 1).rejections,
            vec![Rejection::MissingLineItem(LineItem::NetIncome)]
        );
    }

    #[test]
    fn test_zero_year_window_fails() {
        let series = net_income(&[Some(100.0), Some(120.0)]);
        assert!(!is_consistently_profitable(Some(&series), 0));
        assert_eq!(
            check_profitability(Some(&series), 0).rejections,
            vec![Rejection::EmptyWindow]
        );
    }
}
