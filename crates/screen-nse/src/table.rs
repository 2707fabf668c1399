//! Symbol column detection over delimited text.

use std::io::Read;

use screen_core::{DataError, Result, Symbol};
use tracing::{debug, warn};

/// Candidate symbol columns, in priority order (lowercased).
pub const SYMBOL_COLUMNS: &[&str] = &["symbol", "security name", "company name"];

/// Column whose rows may be narrowed to equities.
const SERIES_COLUMN: &str = "series";

/// Series marker for equity rows.
const EQUITY_SERIES: &str = "EQ";

/// Extracts raw symbols from a table with a header row.
///
/// The first candidate in [`SYMBOL_COLUMNS`] present in the header wins.
/// When the winner is `company name` and a `series` column exists, rows are
/// narrowed to the `EQ` series, but only if that keeps at least one row and
/// drops at least one. Malformed rows and unusable cells are skipped.
pub fn symbols_from_table<R: Read>(reader: R, source_name: &str) -> Result<Vec<Symbol>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| DataError::source_unavailable(source_name, e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect();

    let (column, index) = SYMBOL_COLUMNS
        .iter()
        .find_map(|candidate| {
            headers
                .iter()
                .position(|h| h == candidate)
                .map(|i| (*candidate, i))
        })
        .ok_or_else(|| {
            DataError::source_unavailable(
                source_name,
                format!(
                    "no symbol column found (looked for {SYMBOL_COLUMNS:?}); available columns: {headers:?}"
                ),
            )
        })?;
    debug!(column, source = source_name, "Using symbol column");

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        match record {
            Ok(record) => rows.push(record),
            Err(e) => warn!(source = source_name, row = line + 1, error = %e, "Skipping malformed row"),
        }
    }

    let series_index = headers.iter().position(|h| h == SERIES_COLUMN);
    if column == "company name"
        && let Some(series_index) = series_index
    {
        let equity_rows = rows
            .iter()
            .filter(|r| r.get(series_index) == Some(EQUITY_SERIES))
            .count();
        if equity_rows > 0 && equity_rows < rows.len() {
            debug!(
                equity_rows,
                total_rows = rows.len(),
                "Narrowing to EQ series rows"
            );
            rows.retain(|r| r.get(series_index) == Some(EQUITY_SERIES));
        }
    }

    let symbols = rows
        .iter()
        .filter_map(|r| r.get(index))
        .filter_map(|cell| match Symbol::parse(cell) {
            Ok(symbol) => Some(symbol),
            Err(e) => {
                debug!(cell, error = %e, "Skipping unusable symbol cell");
                None
            }
        })
        .collect();

    Ok(symbols)
}

/// Deduplicates and sorts symbols, appending a market suffix when given.
#[must_use]
pub fn prepare_for_lookup(symbols: Vec<Symbol>, market_suffix: Option<&str>) -> Vec<Symbol> {
    let mut prepared: Vec<Symbol> = symbols
        .into_iter()
        .map(|s| match market_suffix {
            Some(suffix) => s.with_suffix(suffix),
            None => s,
        })
        .collect();
    prepared.sort();
    prepared.dedup();
    prepared
}

/// Counts the data rows of a table, skipping malformed ones.
pub fn count_rows<R: Read>(reader: R, source_name: &str) -> Result<usize> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    rdr.headers()
        .map_err(|e| DataError::source_unavailable(source_name, e.to_string()))?;
    Ok(rdr.records().filter(std::result::Result::is_ok).count())
}
