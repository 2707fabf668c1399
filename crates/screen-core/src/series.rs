//! Multi-year financial statement series.
//!
//! An [`AnnualFinancialSeries`] maps a [`LineItem`] to one value per fiscal
//! year, most recent year first. Any value may be absent. Series are built
//! once per fetch and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Statement line items used by the screening rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LineItem {
    /// Net income attributable to shareholders.
    NetIncome,
    /// Earnings before interest and taxes.
    Ebit,
    /// Explicitly reported total debt.
    TotalDebt,
    /// Long-term debt.
    LongTermDebt,
    /// Short-term debt and current portion of long-term debt.
    ShortLongTermDebt,
    /// Total stockholder equity.
    TotalStockholderEquity,
    /// Total assets.
    TotalAssets,
    /// Total current liabilities.
    TotalCurrentLiabilities,
}

impl LineItem {
    /// Human-readable statement label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NetIncome => "Net Income",
            Self::Ebit => "EBIT",
            Self::TotalDebt => "Total Debt",
            Self::LongTermDebt => "Long Term Debt",
            Self::ShortLongTermDebt => "Short Long Term Debt",
            Self::TotalStockholderEquity => "Total Stockholder Equity",
            Self::TotalAssets => "Total Assets",
            Self::TotalCurrentLiabilities => "Total Current Liabilities",
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-fiscal-year statement values, most recent first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualFinancialSeries {
    items: BTreeMap<LineItem, Vec<Option<f64>>>,
}

impl AnnualFinancialSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the values of a line item, most recent first.
    ///
    /// Non-finite values are stored as absent.
    #[must_use]
    pub fn with_item(
        mut self,
        item: LineItem,
        values: impl IntoIterator<Item = Option<f64>>,
    ) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        self.items.insert(item, values);
        self
    }

    /// Returns true if the line item is present.
    #[must_use]
    pub fn contains(&self, item: LineItem) -> bool {
        self.items.contains_key(&item)
    }

    /// All values of a line item, most recent first.
    #[must_use]
    pub fn values(&self, item: LineItem) -> Option<&[Option<f64>]> {
        self.items.get(&item).map(Vec::as_slice)
    }

    /// The most recent period's value of a line item.
    ///
    /// Only the most recent period is consulted; an absent value there is
    /// not replaced by an older one.
    #[must_use]
    pub fn latest(&self, item: LineItem) -> Option<f64> {
        self.values(item)?.first().copied().flatten()
    }

    /// Returns true if the series holds no values at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.values().all(Vec::is_empty)
    }
}
