//! Per-symbol fundamental screening.

use std::fmt;
use std::pin::pin;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use screen_core::{
    FinancialRecords, FundamentalDataProvider, Symbol, ThresholdConfig, fetch_or_unavailable,
};
use screen_filters::{Criterion, Verdict, check_leverage, check_profitability, check_returns};
use tracing::{debug, info};

use crate::config::ScreenConfig;

/// Where a symbol is in the screen. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Records are being fetched.
    Fetch,
    /// Checking net income history.
    Profitability,
    /// Checking debt-to-equity.
    Leverage,
    /// Checking ROE and ROCE.
    Returns,
    /// Every check passed.
    Qualified,
}

impl Stage {
    /// The stage after this one. `Qualified` is terminal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Fetch => Self::Profitability,
            Self::Profitability => Self::Leverage,
            Self::Leverage => Self::Returns,
            Self::Returns | Self::Qualified => Self::Qualified,
        }
    }

    /// The criterion evaluated at this stage, if any.
    #[must_use]
    pub const fn criterion(self) -> Option<Criterion> {
        match self {
            Self::Profitability => Some(Criterion::Profitability),
            Self::Leverage => Some(Criterion::Leverage),
            Self::Returns => Some(Criterion::Returns),
            Self::Fetch | Self::Qualified => None,
        }
    }
}

/// Final state of a screened symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Passed every criterion.
    Qualified,
    /// Stopped at the given criterion.
    Rejected(Criterion),
    /// The provider returned nothing usable.
    Unavailable,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qualified => f.write_str("qualified"),
            Self::Rejected(criterion) => write!(f, "rejected at {criterion}"),
            Self::Unavailable => f.write_str("no data"),
        }
    }
}

/// The screen's verdict for one symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreeningResult {
    /// Symbol as looked up, suffix included.
    pub symbol: Symbol,
    /// Final state.
    pub outcome: Outcome,
    /// Reasons for a rejection, empty when qualified.
    pub reasons: Vec<String>,
}

impl ScreeningResult {
    /// Returns true if the symbol passed every criterion.
    #[must_use]
    pub fn qualified(&self) -> bool {
        self.outcome == Outcome::Qualified
    }
}

/// Results of a run, in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScreeningReport {
    results: Vec<ScreeningResult>,
}

impl ScreeningReport {
    /// Every per-symbol result, in input order.
    #[must_use]
    pub fn results(&self) -> &[ScreeningResult] {
        &self.results
    }

    /// Symbols that passed every criterion, in input order.
    pub fn qualified(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.results
            .iter()
            .filter(|r| r.qualified())
            .map(|r| &r.symbol)
    }

    /// Number of symbols with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Number of symbols screened.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if nothing was screened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

fn check(criterion: Criterion, records: &FinancialRecords, thresholds: &ThresholdConfig) -> Verdict {
    let income = records.income.as_ref();
    let balance_sheet = records.balance_sheet.as_ref();
    let info = records.info.as_ref();
    match criterion {
        Criterion::Profitability => check_profitability(income, thresholds.profitable_years),
        Criterion::Leverage => {
            check_leverage(balance_sheet, info, thresholds.debt_to_equity_ceiling)
        }
        Criterion::Returns => check_returns(
            income,
            balance_sheet,
            info,
            thresholds.roe_floor,
            thresholds.roce_floor,
        ),
    }
}

/// Runs fetched records through the stages, stopping at the first failure.
#[must_use]
pub fn evaluate_records(
    records: &FinancialRecords,
    thresholds: &ThresholdConfig,
) -> (Outcome, Vec<String>) {
    if records.is_unavailable() {
        return (
            Outcome::Unavailable,
            vec!["no data returned by provider".to_string()],
        );
    }

    let mut stage = Stage::Fetch.next();
    while let Some(criterion) = stage.criterion() {
        let verdict = check(criterion, records, thresholds);
        if !verdict.passed() {
            return (Outcome::Rejected(criterion), verdict.reasons());
        }
        stage = stage.next();
    }
    (Outcome::Qualified, Vec::new())
}

/// Screens symbols against a fundamental data provider.
pub struct ScreeningPipeline {
    provider: Arc<dyn FundamentalDataProvider>,
    config: ScreenConfig,
}

impl fmt::Debug for ScreeningPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreeningPipeline")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}

impl ScreeningPipeline {
    /// Creates a pipeline.
    #[must_use]
    pub fn new(provider: Arc<dyn FundamentalDataProvider>, config: ScreenConfig) -> Self {
        Self { provider, config }
    }

    /// The run configuration.
    #[must_use]
    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Fetches and evaluates one symbol. Never fails.
    pub async fn screen_symbol(&self, symbol: &Symbol) -> ScreeningResult {
        let records = fetch_or_unavailable(self.provider.as_ref(), symbol).await;
        let (outcome, reasons) = evaluate_records(&records, &self.config.thresholds);

        match outcome {
            Outcome::Qualified => info!(symbol = %symbol, "Qualified"),
            Outcome::Unavailable => info!(symbol = %symbol, "Skipping, no data from provider"),
            Outcome::Rejected(_) => {
                for reason in &reasons {
                    info!(symbol = %symbol, "{reason}");
                }
            }
        }

        ScreeningResult {
            symbol: symbol.clone(),
            outcome,
            reasons,
        }
    }

    /// Screens every symbol and returns the results in input order.
    pub async fn run(&self, symbols: &[Symbol]) -> ScreeningReport {
        self.run_with(symbols, |_, _, _| {}).await
    }

    /// Like [`run`](Self::run), calling `on_result(position, total, result)`
    /// as each result becomes available, in input order.
    pub async fn run_with<F>(&self, symbols: &[Symbol], mut on_result: F) -> ScreeningReport
    where
        F: FnMut(usize, usize, &ScreeningResult),
    {
        let limit = self.config.limit.unwrap_or(symbols.len());
        let symbols = &symbols[..limit.min(symbols.len())];
        let total = symbols.len();
        info!(
            total,
            max_in_flight = self.config.max_in_flight,
            "Starting screen"
        );

        let results = stream::iter(symbols.iter().enumerate())
            .map(|(index, symbol)| async move {
                let result = self.screen_symbol(symbol).await;
                if index + 1 < total {
                    let pause = if result.outcome == Outcome::Unavailable {
                        self.config.unavailable_pause
                    } else {
                        self.config.pause
                    };
                    if !pause.is_zero() {
                        debug!(?pause, "Pausing between symbols");
                        tokio::time::sleep(pause).await;
                    }
                }
                result
            })
            .buffered(self.config.max_in_flight.max(1));
        let mut results = pin!(results);

        let mut report = ScreeningReport::default();
        while let Some(result) = results.next().await {
            on_result(report.len() + 1, total, &result);
            report.results.push(result);
        }

        info!(
            qualified = report.count(Outcome::Qualified),
            unavailable = report.count(Outcome::Unavailable),
            total,
            "Screen complete"
        );
        report
    }
}
