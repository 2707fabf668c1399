//! Predicate outcomes and rejection reasons.

use std::fmt;

use screen_core::LineItem;
use serde::Serialize;
use thiserror::Error;

/// The fundamental criteria, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Criterion {
    /// Positive net income over the whole window.
    Profitability,
    /// Debt-to-equity below the ceiling.
    Leverage,
    /// ROE and ROCE above their floors.
    Returns,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Profitability => "Profitability",
            Self::Leverage => "Debt",
            Self::Returns => "Returns",
        })
    }
}

/// Why a criterion failed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Rejection {
    /// No income statement was fetched.
    #[error("income statement not available")]
    IncomeUnavailable,

    /// No balance sheet was fetched.
    #[error("balance sheet not available")]
    BalanceSheetUnavailable,

    /// The statement does not report the line item at all.
    #[error("'{0}' not found in statement")]
    MissingLineItem(LineItem),

    /// A zero-year window would pass any statement.
    #[error("profitability window must cover at least one year")]
    EmptyWindow,

    /// Too few fiscal periods for the window.
    #[error("not enough data (available: {available}, needed: {needed})")]
    InsufficientHistory {
        /// Periods reported.
        available: usize,
        /// Periods required.
        needed: usize,
    },

    /// A period inside the window has no value.
    #[error("missing {item} values in the last {years} years")]
    GapInWindow {
        /// Line item with the gap.
        item: LineItem,
        /// Window length.
        years: usize,
    },

    /// Some period inside the window was not profitable.
    #[error("not consistently profitable (profitable in {profitable}/{years} of the last {years} years)")]
    NotConsistentlyProfitable {
        /// Periods with positive net income.
        profitable: usize,
        /// Window length.
        years: usize,
    },

    /// The most recent period does not carry a value.
    #[error("most recent {0} is not reported")]
    ValueMissing(LineItem),

    /// Neither an explicit total nor its components gave a usable debt figure.
    #[error("could not determine total debt from the balance sheet")]
    DebtUnresolved,

    /// Shareholder equity is zero, so the ratio is undefined.
    #[error("shareholder equity is zero; {metric} is undefined")]
    ZeroEquity {
        /// Ratio that could not be computed.
        metric: &'static str,
    },

    /// The computed ratio is NaN or infinite.
    #[error("{metric} is not a finite number")]
    NonFinite {
        /// Ratio that degenerated.
        metric: &'static str,
    },

    /// Debt-to-equity at or above the ceiling.
    #[error("high debt (D/E {ratio:.2} >= {ceiling})")]
    HighDebt {
        /// Debt-to-equity ratio.
        ratio: f64,
        /// Configured ceiling.
        ceiling: f64,
    },

    /// Neither capital employed strategy gave a non-zero value.
    #[error("could not determine a non-zero capital employed")]
    CapitalEmployedUnresolved,

    /// ROE at or below the floor.
    #[error("ROE {roe:.4} is not above {floor}")]
    LowRoe {
        /// Return on equity, as a fraction.
        roe: f64,
        /// Configured floor.
        floor: f64,
    },

    /// ROCE at or below the floor.
    #[error("ROCE {roce:.4} is not above {floor}")]
    LowRoce {
        /// Return on capital employed, as a fraction.
        roce: f64,
        /// Configured floor.
        floor: f64,
    },
}

/// Outcome of one criterion for one symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    /// The criterion evaluated.
    pub criterion: Criterion,
    /// Every reason it failed, in the order found; empty on pass.
    pub rejections: Vec<Rejection>,
}

impl Verdict {
    /// A passing verdict.
    #[must_use]
    pub const fn pass(criterion: Criterion) -> Self {
        Self {
            criterion,
            rejections: Vec::new(),
        }
    }

    /// A failing verdict with a single reason.
    #[must_use]
    pub fn fail(criterion: Criterion, rejection: Rejection) -> Self {
        Self {
            criterion,
            rejections: vec![rejection],
        }
    }

    /// Builds a verdict from a single check.
    #[must_use]
    pub fn from_result(criterion: Criterion, result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self::pass(criterion),
            Err(rejection) => Self::fail(criterion, rejection),
        }
    }

    /// Returns true if the criterion passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.rejections.is_empty()
    }

    /// Human-readable reasons, prefixed with the criterion.
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        self.rejections
            .iter()
            .map(|r| format!("{}: {r}", self.criterion))
            .collect()
    }
}
