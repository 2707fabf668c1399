#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the NSE stock screener.
//!
//! This crate provides the foundational abstractions shared by every other
//! crate in the workspace:
//!
//! - [`FundamentalDataProvider`](provider::FundamentalDataProvider) - Summary info and annual statements
//! - [`PriceDataProvider`](provider::PriceDataProvider) - OHLCV price history
//! - [`UniverseProvider`](provider::UniverseProvider) - Symbol sources
//! - [`AnnualFinancialSeries`](series::AnnualFinancialSeries) - Multi-year statement values
//! - [`ThresholdConfig`](config::ThresholdConfig) - Screening thresholds

/// Screening threshold configuration.
pub mod config;
/// Error types for data operations.
pub mod error;
/// Price bar frequency.
pub mod frequency;
/// Provider traits for fetching market data.
pub mod provider;
/// Annual statement series and line items.
pub mod series;
/// Core data types (Symbol, SummaryInfo, FinancialRecords).
pub mod types;

// Re-export commonly used items at crate root
pub use config::ThresholdConfig;
pub use error::{DataError, Result};
pub use frequency::DataFrequency;
pub use provider::{
    DataProvider, FundamentalDataProvider, PriceDataProvider, UniverseProvider,
    fetch_or_unavailable,
};
pub use series::{AnnualFinancialSeries, LineItem};
pub use types::{FinancialRecords, SummaryInfo, Symbol, finite};
