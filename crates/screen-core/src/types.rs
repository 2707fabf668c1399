//! Core data types for screening.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`SummaryInfo`] - Most recent snapshot ratios reported by a provider
//! - [`FinancialRecords`] - Everything fetched for one symbol

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DataError, Result};
use crate::series::AnnualFinancialSeries;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Parses a raw cell value into a symbol.
    ///
    /// Surrounding whitespace is trimmed. Empty values, the literal `nan`
    /// produced by spreadsheet exports, and values with inner whitespace are
    /// rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return Err(DataError::InvalidParameter(format!(
                "empty symbol: {raw:?}"
            )));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DataError::InvalidParameter(format!(
                "symbol contains whitespace: {raw:?}"
            )));
        }
        Ok(Self::new(trimmed))
    }

    /// Returns the symbol with a market qualifier appended (e.g. `.NS`).
    ///
    /// A symbol that already carries the suffix is returned unchanged.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let suffix = suffix.to_uppercase();
        if suffix.is_empty() || self.0.ends_with(&suffix) {
            self.clone()
        } else {
            Self(format!("{}{suffix}", self.0))
        }
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Snapshot ratios reported directly by a provider.
///
/// Units are whatever the provider reports; `debt_to_equity` in particular
/// may be a plain ratio or a percentage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryInfo {
    /// Reported debt-to-equity (`debtToEquity`).
    pub debt_to_equity: Option<f64>,
    /// Reported return on equity as a fraction (`returnOnEquity`).
    pub return_on_equity: Option<f64>,
}

impl SummaryInfo {
    /// Returns true if no metric carries a usable value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.debt_to_equity().is_none() && self.return_on_equity().is_none()
    }

    /// Reported debt-to-equity, if present and finite.
    #[must_use]
    pub fn debt_to_equity(&self) -> Option<f64> {
        finite(self.debt_to_equity)
    }

    /// Reported return on equity, if present and finite.
    #[must_use]
    pub fn return_on_equity(&self) -> Option<f64> {
        finite(self.return_on_equity)
    }
}

/// Everything fetched for a single symbol.
///
/// Each part is independently optional. A provider that could not deliver
/// anything returns [`FinancialRecords::unavailable`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FinancialRecords {
    /// Snapshot ratios.
    pub info: Option<SummaryInfo>,
    /// Annual income statement, most recent period first.
    pub income: Option<AnnualFinancialSeries>,
    /// Annual balance sheet, most recent period first.
    pub balance_sheet: Option<AnnualFinancialSeries>,
}

impl FinancialRecords {
    /// Records with every part absent.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            info: None,
            income: None,
            balance_sheet: None,
        }
    }

    /// Sets the summary info.
    #[must_use]
    pub fn with_info(mut self, info: SummaryInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Sets the income statement.
    #[must_use]
    pub fn with_income(mut self, income: AnnualFinancialSeries) -> Self {
        self.income = Some(income);
        self
    }

    /// Sets the balance sheet.
    #[must_use]
    pub fn with_balance_sheet(mut self, balance_sheet: AnnualFinancialSeries) -> Self {
        self.balance_sheet = Some(balance_sheet);
        self
    }

    /// Returns true when nothing usable was fetched.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.info.as_ref().is_none_or(SummaryInfo::is_empty)
            && self.income.as_ref().is_none_or(AnnualFinancialSeries::is_empty)
            && self
                .balance_sheet
                .as_ref()
                .is_none_or(AnnualFinancialSeries::is_empty)
    }
}

/// Treats NaN and infinities as absent.
#[must_use]
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::LineItem;

    #[test]
    fn test_symbol_uppercases() {
        assert_eq!(Symbol::new("reliance").as_str(), "RELIANCE");
    }

    #[test]
    fn test_symbol_parse_rejects_blank_and_nan() {
        assert!(Symbol::parse("   ").is_err());
        assert!(Symbol::parse("nan").is_err());
        assert!(Symbol::parse("NaN").is_err());
        assert!(Symbol::parse("TATA MOTORS").is_err());
        assert_eq!(Symbol::parse("  infy ").unwrap().as_str(), "INFY");
    }

    #[test]
    fn test_symbol_suffix() {
        let symbol = Symbol::new("tcs");
        assert_eq!(symbol.with_suffix(".NS").as_str(), "TCS.NS");
        assert_eq!(symbol.with_suffix(".ns").as_str(), "TCS.NS");
        assert_eq!(
            symbol.with_suffix(".NS").with_suffix(".NS").as_str(),
            "TCS.NS"
        );
        assert_eq!(symbol.with_suffix("").as_str(), "TCS");
    }

    #[test]
    fn test_symbol_ordering_is_lexical() {
        let mut symbols = vec![Symbol::new("WIPRO"), Symbol::new("INFY"), Symbol::new("HDFC")];
        symbols.sort();
        assert_eq!(
            symbols,
            vec![Symbol::new("HDFC"), Symbol::new("INFY"), Symbol::new("WIPRO")]
        );
    }

    #[test]
    fn test_summary_info_ignores_nan() {
        let info = SummaryInfo {
            debt_to_equity: Some(f64::NAN),
            ..Default::default()
        };
        assert!(info.is_empty());
        assert_eq!(info.debt_to_equity(), None);
    }

    #[test]
    fn test_records_unavailable() {
        assert!(FinancialRecords::unavailable().is_unavailable());
        assert!(
            FinancialRecords::unavailable()
                .with_info(SummaryInfo::default())
                .with_income(AnnualFinancialSeries::new())
                .is_unavailable()
        );

        let income = AnnualFinancialSeries::new().with_item(LineItem::NetIncome, [Some(1.0)]);
        assert!(
            !FinancialRecords::unavailable()
                .with_income(income)
                .is_unavailable()
        );
    }
}
