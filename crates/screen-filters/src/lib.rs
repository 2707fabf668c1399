#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # Example
//!
//! ```
//! use screen_core::{AnnualFinancialSeries, LineItem, ThresholdConfig};
//! use screen_filters::check_profitability;
//!
//! let income = AnnualFinancialSeries::new().with_item(
//!     LineItem::NetIncome,
//!     [Some(100.0), Some(120.0), Some(90.0), Some(80.0), Some(110.0)],
//! );
//! let thresholds = ThresholdConfig::default();
//! assert!(check_profitability(Some(&income), thresholds.profitable_years).passed());
//! ```

pub mod resolve;

mod gaps;
mod growth;
mod leverage;
mod profitability;
mod returns;
mod verdict;

pub use gaps::{DEFAULT_TOP_GAPS, PriceGap, PricePoint, rank_price_gaps};
pub use growth::{
    DEFAULT_LOOKBACK_MONTHS, DEFAULT_MIN_AVG_VOLUME, DEFAULT_MIN_GROWTH_PCT, DEFAULT_MIN_PRICE,
    DEFAULT_MIN_ROWS, GrowthCriteria, GrowthRecord, evaluate_growth, sort_by_growth,
};
pub use leverage::{
    PERCENT_HEURISTIC_CUTOFF, check_leverage, debt_to_equity, has_low_debt,
    normalize_reported_debt_to_equity,
};
pub use profitability::{check_profitability, is_consistently_profitable};
pub use resolve::{CAPITAL_EMPLOYED, EMPLOYED_DEBT, ResolutionChain, Resolved, TOTAL_DEBT};
pub use returns::{check_returns, has_good_returns, return_on_capital_employed, return_on_equity};
pub use verdict::{Criterion, Rejection, Verdict};
