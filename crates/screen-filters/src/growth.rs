//! Price growth over a lookback window.

use polars::prelude::*;
use screen_core::{DataError, Result, Symbol};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default lookback in calendar months.
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 6;

/// Default minimum number of daily bars.
pub const DEFAULT_MIN_ROWS: usize = 60;

/// Default price floor for both ends of the window.
pub const DEFAULT_MIN_PRICE: f64 = 10.0;

/// Default floor for mean daily volume.
pub const DEFAULT_MIN_AVG_VOLUME: f64 = 100_000.0;

/// Default minimum growth, in percent.
pub const DEFAULT_MIN_GROWTH_PCT: f64 = 100.0;

/// Thresholds for the growth screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthCriteria {
    /// Window length in calendar months.
    pub lookback_months: u32,
    /// Minimum number of bars in the window.
    pub min_rows: usize,
    /// Start and end prices must be strictly above this.
    pub min_price: f64,
    /// Mean volume must be at least this.
    pub min_avg_volume: f64,
    /// Growth must be at least this many percent.
    pub min_growth_pct: f64,
}

impl Default for GrowthCriteria {
    fn default() -> Self {
        Self {
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            min_rows: DEFAULT_MIN_ROWS,
            min_price: DEFAULT_MIN_PRICE,
            min_avg_volume: DEFAULT_MIN_AVG_VOLUME,
            min_growth_pct: DEFAULT_MIN_GROWTH_PCT,
        }
    }
}

impl GrowthCriteria {
    /// Sets the minimum growth in percent.
    #[must_use]
    pub const fn with_min_growth_pct(mut self, pct: f64) -> Self {
        self.min_growth_pct = pct;
        self
    }

    /// Sets the minimum number of bars.
    #[must_use]
    pub const fn with_min_rows(mut self, rows: usize) -> Self {
        self.min_rows = rows;
        self
    }
}

/// A symbol that met the growth criteria.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GrowthRecord {
    /// Provider symbol, including any market suffix.
    pub symbol: Symbol,
    /// First adjusted close in the window.
    pub start_price: f64,
    /// Last adjusted close in the window.
    pub end_price: f64,
    /// `(end - start) / start * 100`.
    pub growth_pct: f64,
    /// Mean daily volume over the window.
    pub avg_volume: f64,
}

fn polars_err(e: PolarsError) -> DataError {
    DataError::Parse(e.to_string())
}

/// Evaluates a window of daily bars.
///
/// Expects the `adjusted_close` and `volume` columns produced by the price
/// providers. Returns `Ok(None)` when the window is too short, either end
/// price is missing or at or below the floor, volume is too thin, or growth
/// falls short.
pub fn evaluate_growth(
    symbol: &Symbol,
    bars: &DataFrame,
    criteria: &GrowthCriteria,
) -> Result<Option<GrowthRecord>> {
    let rows = bars.height();
    if rows == 0 || rows < criteria.min_rows {
        debug!(%symbol, rows, "Too few bars");
        return Ok(None);
    }

    let closes = bars
        .column("adjusted_close")
        .map_err(polars_err)?
        .as_materialized_series()
        .f64()
        .map_err(polars_err)?;

    let (Some(start_price), Some(end_price)) = (closes.get(0), closes.get(rows - 1)) else {
        debug!(%symbol, "Missing price at window edge");
        return Ok(None);
    };
    if start_price <= criteria.min_price || end_price <= criteria.min_price {
        debug!(%symbol, start_price, end_price, "Price below floor");
        return Ok(None);
    }

    let avg_volume = bars
        .column("volume")
        .map_err(polars_err)?
        .as_materialized_series()
        .mean()
        .unwrap_or(0.0);
    if avg_volume < criteria.min_avg_volume {
        debug!(%symbol, avg_volume, "Volume below floor");
        return Ok(None);
    }

    let growth_pct = (end_price - start_price) / start_price * 100.0;
    if growth_pct < criteria.min_growth_pct {
        return Ok(None);
    }

    Ok(Some(GrowthRecord {
        symbol: symbol.clone(),
        start_price,
        end_price,
        growth_pct,
        avg_volume,
    }))
}

/// Sorts records by growth, largest first.
pub fn sort_by_growth(records: &mut [GrowthRecord]) {
    records.sort_by(|a, b| b.growth_pct.total_cmp(&a.growth_pct));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(closes: &[Option<f64>], volume: u64) -> DataFrame {
        let volumes = vec![volume; closes.len()];
        df!(
            "adjusted_close" => closes.to_vec(),
            "volume" => volumes,
        )
        .unwrap()
    }

    fn ramp(start: f64, end: f64, rows: usize) -> Vec<Option<f64>> {
        let step = (end - start) / (rows - 1) as f64;
        let mut closes: Vec<Option<f64>> =
            (0..rows).map(|i| Some(start + step * i as f64)).collect();
        closes[rows - 1] = Some(end);
        closes
    }

    #[test]
    fn test_doubled_stock_is_kept() {
        let symbol = Symbol::new("ABC.NS");
        let df = bars(&ramp(20.0, 50.0, 120), 250_000);

        let record = evaluate_growth(&symbol, &df, &GrowthCriteria::default())
            .unwrap()
            .unwrap();
        assert_eq!(record.start_price, 20.0);
        assert_eq!(record.end_price, 50.0);
        assert_eq!(record.growth_pct, 150.0);
        assert_eq!(record.avg_volume, 250_000.0);
    }

    #[test]
    fn test_growth_floor_is_inclusive() {
        let df = bars(&ramp(20.0, 40.0, 60), 100_000);
        let record = evaluate_growth(&Symbol::new("X"), &df, &GrowthCriteria::default()).unwrap();
        assert!(record.is_some());
    }

    #[test]
    fn test_rejections() {
        let criteria = GrowthCriteria::default();
        let symbol = Symbol::new("X");

        let short = bars(&ramp(20.0, 60.0, 59), 500_000);
        assert!(evaluate_growth(&symbol, &short, &criteria).unwrap().is_none());

        let penny = bars(&ramp(10.0, 30.0, 100), 500_000);
        assert!(evaluate_growth(&symbol, &penny, &criteria).unwrap().is_none());

        let thin = bars(&ramp(20.0, 60.0, 100), 99_999);
        assert!(evaluate_growth(&symbol, &thin, &criteria).unwrap().is_none());

        let slow = bars(&ramp(20.0, 39.0, 100), 500_000);
        assert!(evaluate_growth(&symbol, &slow, &criteria).unwrap().is_none());

        let mut gap = ramp(20.0, 60.0, 100);
        gap[99] = None;
        let gap = bars(&gap, 500_000);
        assert!(evaluate_growth(&symbol, &gap, &criteria).unwrap().is_none());
    }

    #[test]
    fn test_empty_window_is_skipped() {
        let criteria = GrowthCriteria::default().with_min_rows(0);
        let empty = bars(&[], 500_000);
        assert!(
            evaluate_growth(&Symbol::new("X"), &empty, &criteria)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_missing_column_is_parse_error() {
        let df = df!("close" => vec![20.0; 80]).unwrap();
        let err = evaluate_growth(&Symbol::new("X"), &df, &GrowthCriteria::default()).unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_sort_by_growth() {
        let record = |name: &str, growth_pct: f64| GrowthRecord {
            symbol: Symbol::new(name),
            start_price: 1.0,
            end_price: 1.0,
            growth_pct,
            avg_volume: 1.0,
        };
        let mut records = vec![record("A", 120.0), record("B", 310.0), record("C", 150.0)];
        sort_by_growth(&mut records);
        let order: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }
}
