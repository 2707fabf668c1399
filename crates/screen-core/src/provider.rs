//! Provider traits for fetching market data.
//!
//! This module defines the core provider traits:
//!
//! - [`DataProvider`] - Base trait for all data providers
//! - [`FundamentalDataProvider`] - Summary info and annual statements
//! - [`PriceDataProvider`] - OHLCV price history
//! - [`UniverseProvider`] - A source of ticker symbols to screen

use async_trait::async_trait;
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use std::fmt::Debug;
use tracing::warn;

use crate::{
    error::Result,
    frequency::DataFrequency,
    types::{FinancialRecords, Symbol},
};

/// Base trait for all data providers.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "Yahoo Finance").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;

    /// Returns the price frequencies supported by this provider.
    fn supported_frequencies(&self) -> &[DataFrequency];
}

/// Provider for fundamental financial data.
#[async_trait]
pub trait FundamentalDataProvider: DataProvider {
    /// Fetches summary info, the annual income statement and the annual
    /// balance sheet for a symbol.
    ///
    /// Parts the provider does not have are returned as `None`. An `Err` means
    /// nothing at all could be fetched.
    async fn fetch_records(&self, symbol: &Symbol) -> Result<FinancialRecords>;
}

/// Provider for OHLCV price data.
#[async_trait]
pub trait PriceDataProvider: DataProvider {
    /// Fetches OHLCV data for a single symbol.
    ///
    /// Returns a DataFrame with columns: symbol, date, open, high, low, close,
    /// volume, adjusted_close.
    async fn fetch_ohlcv(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        frequency: DataFrequency,
    ) -> Result<DataFrame>;
}

/// A source of ticker symbols.
#[async_trait]
pub trait UniverseProvider: Send + Sync + Debug {
    /// Describes where the symbols come from (file path or URL).
    fn source_name(&self) -> &str;

    /// Loads the raw symbols in source order.
    ///
    /// Fails with [`DataError::SourceUnavailable`](crate::DataError::SourceUnavailable)
    /// when no symbol column can be located.
    async fn universe(&self) -> Result<Vec<Symbol>>;
}

/// Fetches records for a symbol, collapsing any failure into
/// [`FinancialRecords::unavailable`].
///
/// This never fails: callers decide per predicate whether absence matters.
pub async fn fetch_or_unavailable(
    provider: &dyn FundamentalDataProvider,
    symbol: &Symbol,
) -> FinancialRecords {
    match provider.fetch_records(symbol).await {
        Ok(records) => records,
        Err(e) => {
            warn!(
                provider = provider.name(),
                symbol = %symbol,
                error = %e,
                "Fetch failed, treating symbol as unavailable"
            );
            FinancialRecords::unavailable()
        }
    }
}
