#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # Features
//!
//! - `yahoo` - Yahoo Finance fundamentals and price history
//! - `nse` - NSE constituents files and the equity listing
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use screen::{ScreenConfig, ScreeningPipeline, UniverseSource, YahooProvider, resolve_universe};
//!
//! #[tokio::main]
//! async fn main() -> screen::Result<()> {
//!     let config = ScreenConfig::default().validate()?;
//!     let source = UniverseSource::File("nifty_500_constituents.csv".into());
//!     let symbols = resolve_universe(&source, Some(&config.market_suffix)).await?;
//!
//!     let pipeline = ScreeningPipeline::new(Arc::new(YahooProvider::new()), config);
//!     let report = pipeline.run(&symbols).await;
//!     for symbol in report.qualified() {
//!         println!("- {symbol}");
//!     }
//!     Ok(())
//! }
//! ```

pub use screen_core::*;
pub use screen_core::config::{
    DEFAULT_DEBT_TO_EQUITY_CEILING, DEFAULT_PROFITABLE_YEARS, DEFAULT_ROCE_FLOOR, DEFAULT_ROE_FLOOR,
};
pub use screen_filters::{
    Criterion, DEFAULT_MIN_GROWTH_PCT, DEFAULT_TOP_GAPS, GrowthCriteria, GrowthRecord, PriceGap,
    PricePoint, Rejection, Verdict, check_leverage, check_profitability, check_returns, has_good_returns, has_low_debt,
    is_consistently_profitable, rank_price_gaps,
};

#[cfg(feature = "nse")]
pub use screen_nse::{
    ConstituentsFile, DEFAULT_CONSTITUENTS_FILE, EQUITY_LISTING_URL, NSE_SUFFIX,
    NseEquityListing, UniverseSource, resolve_universe,
};
#[cfg(feature = "yahoo")]
pub use screen_yahoo::YahooProvider;

mod config;
mod export;
mod growth;
mod pipeline;

pub use config::{
    DEFAULT_GROWTH_PAUSE, DEFAULT_MARKET_SUFFIX, DEFAULT_PAUSE, DEFAULT_UNAVAILABLE_PAUSE,
    ScreenConfig,
};
pub use export::{
    DEFAULT_GROWTH_EXPORT, group_thousands, growth_frame, read_price_points, write_growth_csv,
};
pub use growth::GrowthScreen;
pub use pipeline::{
    Outcome, ScreeningPipeline, ScreeningReport, ScreeningResult, Stage, evaluate_records,
};
