//! CSV output for the growth screen and CSV input for price-gap ranking.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{Column, CsvWriter, DataFrame, PolarsError, SerWriter};
use screen_core::{DataError, Result};
use screen_filters::{GrowthRecord, PricePoint};
use tracing::{info, warn};

/// Default file name for the growth export.
pub const DEFAULT_GROWTH_EXPORT: &str = "all_doubled_stocks.csv";

fn polars_err(e: PolarsError) -> DataError {
    DataError::Other(e.to_string())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a value as a whole number with thousands separators.
#[must_use]
pub fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value.is_sign_negative() && digits.bytes().any(|b| b != b'0') {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Builds the export frame: `Symbol`, `Start Price`, `End Price`, `Growth %`,
/// `3M Avg Volume`. Prices and growth are rounded to two decimals.
pub fn growth_frame(records: &[GrowthRecord]) -> Result<DataFrame> {
    let symbols: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
    let start: Vec<f64> = records.iter().map(|r| round2(r.start_price)).collect();
    let end: Vec<f64> = records.iter().map(|r| round2(r.end_price)).collect();
    let growth: Vec<f64> = records.iter().map(|r| round2(r.growth_pct)).collect();
    let volume: Vec<String> = records
        .iter()
        .map(|r| group_thousands(r.avg_volume))
        .collect();

    DataFrame::new(vec![
        Column::new("Symbol".into(), symbols),
        Column::new("Start Price".into(), start),
        Column::new("End Price".into(), end),
        Column::new("Growth %".into(), growth),
        Column::new("3M Avg Volume".into(), volume),
    ])
    .map_err(polars_err)
}

/// Writes growth records to `path` as CSV with a header row.
pub fn write_growth_csv(records: &[GrowthRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut frame = growth_frame(records)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .map_err(polars_err)?;
    info!(rows = records.len(), path = %path.display(), "Exported growth results");
    Ok(())
}

/// Reads `name,price` rows. Rows that do not parse are skipped.
pub fn read_price_points<R: Read>(reader: R) -> Result<Vec<PricePoint>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (line, row) in csv_reader.deserialize::<PricePoint>().enumerate() {
        match row {
            Ok(point) => points.push(point),
            Err(e) => warn!(line = line + 2, error = %e, "Skipping malformed price row"),
        }
    }

    if points.is_empty() {
        return Err(DataError::Parse(
            "no `name,price` rows could be read".to_string(),
        ));
    }
    Ok(points)
}
