//! Six-month price growth screen.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Months, NaiveDate};
use screen_core::{DataFrequency, PriceDataProvider, Symbol};
use screen_filters::{GrowthCriteria, GrowthRecord, evaluate_growth, sort_by_growth};
use tracing::{debug, info};

use crate::config::DEFAULT_GROWTH_PAUSE;

/// Finds symbols whose price grew by at least the configured percentage.
pub struct GrowthScreen {
    provider: Arc<dyn PriceDataProvider>,
    criteria: GrowthCriteria,
    pause: Duration,
    limit: Option<usize>,
}

impl fmt::Debug for GrowthScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowthScreen")
            .field("provider", &self.provider.name())
            .field("criteria", &self.criteria)
            .field("pause", &self.pause)
            .field("limit", &self.limit)
            .finish()
    }
}

impl GrowthScreen {
    /// Creates a screen with default criteria.
    #[must_use]
    pub fn new(provider: Arc<dyn PriceDataProvider>) -> Self {
        Self {
            provider,
            criteria: GrowthCriteria::default(),
            pause: DEFAULT_GROWTH_PAUSE,
            limit: None,
        }
    }

    /// Sets the criteria.
    #[must_use]
    pub const fn with_criteria(mut self, criteria: GrowthCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Sets the pause between requests.
    #[must_use]
    pub const fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Restricts the screen to the first `limit` symbols.
    #[must_use]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// The lookback window ending at `end`.
    #[must_use]
    pub fn window(&self, end: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = end
            .checked_sub_months(Months::new(self.criteria.lookback_months))
            .unwrap_or(NaiveDate::MIN);
        (start, end)
    }

    /// Screens every symbol, returning matches sorted by growth, largest first.
    pub async fn run(&self, symbols: &[Symbol], end: NaiveDate) -> Vec<GrowthRecord> {
        self.run_with(symbols, end, |_, _| {}).await
    }

    /// Like [`run`](Self::run), calling `on_progress(position, total)` after
    /// each symbol.
    pub async fn run_with<F>(
        &self,
        symbols: &[Symbol],
        end: NaiveDate,
        mut on_progress: F,
    ) -> Vec<GrowthRecord>
    where
        F: FnMut(usize, usize),
    {
        let (start, end) = self.window(end);
        let limit = self.limit.unwrap_or(symbols.len()).min(symbols.len());
        let symbols = &symbols[..limit];
        let total = symbols.len();
        info!(total, %start, %end, "Starting growth screen");

        let mut records = Vec::new();
        for (index, symbol) in symbols.iter().enumerate() {
            match self
                .provider
                .fetch_ohlcv(symbol, start, end, DataFrequency::Daily)
                .await
            {
                Ok(bars) => match evaluate_growth(symbol, &bars, &self.criteria) {
                    Ok(Some(record)) => {
                        info!(symbol = %symbol, growth_pct = record.growth_pct, "Growth match");
                        records.push(record);
                    }
                    Ok(None) => {}
                    Err(e) => debug!(symbol = %symbol, error = %e, "Skipping, unusable bars"),
                },
                Err(e) => debug!(symbol = %symbol, error = %e, "Skipping, fetch failed"),
            }

            on_progress(index + 1, total);
            if index + 1 < total && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
        }

        sort_by_growth(&mut records);
        info!(matches = records.len(), total, "Growth screen complete");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use polars::df;
    use polars::prelude::DataFrame;
    use screen_core::{DataError, DataProvider, Result};

    #[derive(Debug)]
    struct StubPrices;

    impl DataProvider for StubPrices {
        fn name(&self) -> &str {
            "stub"
        }

        fn description(&self) -> &str {
            "synthetic bars"
        }

        fn supported_frequencies(&self) -> &[DataFrequency] {
            &[DataFrequency::Daily]
        }
    }

    #[async_trait]
    impl PriceDataProvider for StubPrices {
        async fn fetch_ohlcv(
            &self,
            symbol: &Symbol,
            _start: NaiveDate,
            _end: NaiveDate,
            _frequency: DataFrequency,
        ) -> Result<DataFrame> {
            let (start, end) = match symbol.as_str() {
                "TRIPLE.NS" => (20.0, 60.0),
                "DOUBLE.NS" => (20.0, 40.0),
                "FLAT.NS" => (20.0, 22.0),
                _ => return Err(DataError::SymbolNotFound(symbol.to_string())),
            };
            let mut closes = vec![start; 80];
            closes[79] = end;
            df!(
                "adjusted_close" => closes,
                "volume" => vec![200_000u64; 80],
            )
            .map_err(|e| DataError::Parse(e.to_string()))
        }
    }

    fn symbols(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|s| Symbol::new(*s)).collect()
    }

    #[test]
    fn test_window_spans_lookback() {
        let screen = GrowthScreen::new(Arc::new(StubPrices));
        let end = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
        let (start, _) = screen.window(end);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[tokio::test]
    async fn test_run_sorts_and_skips_failures() {
        let screen = GrowthScreen::new(Arc::new(StubPrices)).with_pause(Duration::ZERO);
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        let mut progress = 0;
        let records = screen
            .run_with(
                &symbols(&["DOUBLE.NS", "MISSING.NS", "FLAT.NS", "TRIPLE.NS"]),
                end,
                |i, _| progress = i,
            )
            .await;

        let order: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, vec!["TRIPLE.NS", "DOUBLE.NS"]);
        assert_eq!(records[0].growth_pct, 200.0);
        assert_eq!(progress, 4);
    }

    #[tokio::test]
    async fn test_limit() {
        let screen = GrowthScreen::new(Arc::new(StubPrices))
            .with_pause(Duration::ZERO)
            .with_limit(Some(1));
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let records = screen.run(&symbols(&["DOUBLE.NS", "TRIPLE.NS"]), end).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol.as_str(), "DOUBLE.NS");
    }
}
