//! Largest gaps between adjacent prices.

use serde::{Deserialize, Serialize};

/// Default number of gaps reported.
pub const DEFAULT_TOP_GAPS: usize = 3;

/// A named price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Stock name or symbol.
    pub name: String,
    /// Last price.
    pub price: f64,
}

impl PricePoint {
    /// Creates a price point.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// The drop from one price to the next lower one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceGap {
    /// The higher-priced stock.
    pub higher: String,
    /// The next lower-priced stock.
    pub lower: String,
    /// `(higher - lower) / higher * 100`, rounded to two decimals.
    pub gap_pct: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ranks the `top_n` largest percentage gaps between adjacent prices.
///
/// Prices are ordered from highest to lowest and each neighbouring pair forms
/// one gap. Non-finite prices are ignored, as are pairs whose higher price is
/// not positive. Ties keep price order.
#[must_use]
pub fn rank_price_gaps(prices: &[PricePoint], top_n: usize) -> Vec<PriceGap> {
    let mut sorted: Vec<&PricePoint> = prices.iter().filter(|p| p.price.is_finite()).collect();
    sorted.sort_by(|a, b| b.price.total_cmp(&a.price));

    let mut gaps: Vec<PriceGap> = sorted
        .windows(2)
        .filter(|pair| pair[0].price > 0.0)
        .map(|pair| PriceGap {
            higher: pair[0].name.clone(),
            lower: pair[1].name.clone(),
            gap_pct: round2((pair[0].price - pair[1].price) / pair[0].price * 100.0),
        })
        .collect();

    gaps.sort_by(|a, b| b.gap_pct.total_cmp(&a.gap_pct));
    gaps.truncate(top_n);
    gaps
}
