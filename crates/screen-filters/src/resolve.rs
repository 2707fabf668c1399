//! Ordered field-resolution chains over the most recent balance sheet period.
//!
//! A chain tries its strategies in order and keeps the first value that is
//! finite and satisfies the chain's acceptance rule. Each strategy is a plain
//! function so it can be tested on its own.

use screen_core::{AnnualFinancialSeries, LineItem};

/// Computes a candidate value from a statement, or `None` if its inputs are missing.
pub type Resolver = fn(&AnnualFinancialSeries) -> Option<f64>;

/// A named resolution strategy.
#[derive(Clone, Copy, Debug)]
pub struct Strategy {
    /// Short label used in logs.
    pub name: &'static str,
    /// The computation.
    pub resolve: Resolver,
}

/// A value together with the strategy that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved {
    /// Resolved value.
    pub value: f64,
    /// Name of the strategy that produced it.
    pub strategy: &'static str,
}

/// Strategies tried in order until one yields an acceptable value.
#[derive(Clone, Copy, Debug)]
pub struct ResolutionChain {
    name: &'static str,
    strategies: &'static [Strategy],
    accept: fn(f64) -> bool,
}

impl ResolutionChain {
    /// Creates a chain.
    #[must_use]
    pub const fn new(
        name: &'static str,
        strategies: &'static [Strategy],
        accept: fn(f64) -> bool,
    ) -> Self {
        Self {
            name,
            strategies,
            accept,
        }
    }

    /// Name of the quantity this chain resolves.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Strategies in the order they are tried.
    #[must_use]
    pub const fn strategies(&self) -> &'static [Strategy] {
        self.strategies
    }

    /// Returns the first acceptable value, or `None` if every strategy fails.
    #[must_use]
    pub fn resolve(&self, sheet: &AnnualFinancialSeries) -> Option<Resolved> {
        self.strategies.iter().find_map(|strategy| {
            (strategy.resolve)(sheet)
                .filter(|v| v.is_finite() && (self.accept)(*v))
                .map(|value| Resolved {
                    value,
                    strategy: strategy.name,
                })
        })
    }
}

/// The explicit "Total Debt" line.
#[must_use]
pub fn explicit_total_debt(sheet: &AnnualFinancialSeries) -> Option<f64> {
    sheet.latest(LineItem::TotalDebt)
}

/// Long-term debt plus its current portion, missing components counted as zero.
///
/// A zero sum falls back to the long-term component alone when it was
/// reported and non-zero; otherwise the composition is unresolved.
#[must_use]
pub fn composed_debt(sheet: &AnnualFinancialSeries) -> Option<f64> {
    let long_term = sheet.latest(LineItem::LongTermDebt);
    let current_portion = sheet.latest(LineItem::ShortLongTermDebt);

    let sum = long_term.unwrap_or(0.0) + current_portion.unwrap_or(0.0);
    if sum != 0.0 {
        return Some(sum);
    }
    long_term.filter(|v| *v != 0.0)
}

/// Long-term debt plus its current portion, missing components counted as zero.
///
/// Always resolves, so a company reporting no debt lines carries zero debt.
#[must_use]
pub fn summed_debt(sheet: &AnnualFinancialSeries) -> Option<f64> {
    let long_term = sheet.latest(LineItem::LongTermDebt).unwrap_or(0.0);
    let current_portion = sheet.latest(LineItem::ShortLongTermDebt).unwrap_or(0.0);
    Some(long_term + current_portion)
}

/// Total assets less total current liabilities.
#[must_use]
pub fn assets_less_current_liabilities(sheet: &AnnualFinancialSeries) -> Option<f64> {
    let assets = sheet.latest(LineItem::TotalAssets)?;
    let current_liabilities = sheet.latest(LineItem::TotalCurrentLiabilities)?;
    Some(assets - current_liabilities)
}

/// Shareholder equity plus debt, debt resolved through [`EMPLOYED_DEBT`].
#[must_use]
pub fn equity_plus_debt(sheet: &AnnualFinancialSeries) -> Option<f64> {
    let equity = sheet.latest(LineItem::TotalStockholderEquity)?;
    let debt = EMPLOYED_DEBT.resolve(sheet)?;
    Some(equity + debt.value)
}

fn accept_any(_: f64) -> bool {
    true
}

fn non_zero(value: f64) -> bool {
    value != 0.0
}

/// Total debt: explicit line first, then the long-term composition.
pub const TOTAL_DEBT: ResolutionChain = ResolutionChain::new(
    "total debt",
    &[
        Strategy {
            name: "explicit",
            resolve: explicit_total_debt,
        },
        Strategy {
            name: "long term + current portion",
            resolve: composed_debt,
        },
    ],
    accept_any,
);

/// Debt counted in capital employed: explicit line first, then the plain
/// component sum. Zero debt is a valid answer here.
pub const EMPLOYED_DEBT: ResolutionChain = ResolutionChain::new(
    "employed debt",
    &[
        Strategy {
            name: "explicit",
            resolve: explicit_total_debt,
        },
        Strategy {
            name: "long term + current portion",
            resolve: summed_debt,
        },
    ],
    accept_any,
);

/// Capital employed: assets less current liabilities, then equity plus debt.
/// Zero is never accepted.
pub const CAPITAL_EMPLOYED: ResolutionChain = ResolutionChain::new(
    "capital employed",
    &[
        Strategy {
            name: "assets - current liabilities",
            resolve: assets_less_current_liabilities,
        },
        Strategy {
            name: "equity + debt",
            resolve: equity_plus_debt,
        },
    ],
    non_zero,
);
