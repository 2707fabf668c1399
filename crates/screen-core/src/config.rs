//! Screening thresholds.
//!
//! [`ThresholdConfig`] is built once per run and passed by reference into
//! every predicate. It is never mutated after validation.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Default number of consecutive profitable years required.
pub const DEFAULT_PROFITABLE_YEARS: usize = 5;

/// Default debt-to-equity ceiling (exclusive).
pub const DEFAULT_DEBT_TO_EQUITY_CEILING: f64 = 1.0;

/// Default return-on-equity floor (exclusive), as a fraction.
pub const DEFAULT_ROE_FLOOR: f64 = 0.15;

/// Default return-on-capital-employed floor (exclusive), as a fraction.
pub const DEFAULT_ROCE_FLOOR: f64 = 0.15;

/// Thresholds applied by the fundamental predicates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Most recent fiscal years that must all show positive net income.
    pub profitable_years: usize,
    /// A debt-to-equity ratio must be strictly below this to pass.
    pub debt_to_equity_ceiling: f64,
    /// ROE must be strictly above this fraction to pass.
    pub roe_floor: f64,
    /// ROCE must be strictly above this fraction to pass.
    pub roce_floor: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            profitable_years: DEFAULT_PROFITABLE_YEARS,
            debt_to_equity_ceiling: DEFAULT_DEBT_TO_EQUITY_CEILING,
            roe_floor: DEFAULT_ROE_FLOOR,
            roce_floor: DEFAULT_ROCE_FLOOR,
        }
    }
}

impl ThresholdConfig {
    /// Sets the profitability window.
    #[must_use]
    pub const fn with_profitable_years(mut self, years: usize) -> Self {
        self.profitable_years = years;
        self
    }

    /// Sets the debt-to-equity ceiling.
    #[must_use]
    pub const fn with_debt_to_equity_ceiling(mut self, ceiling: f64) -> Self {
        self.debt_to_equity_ceiling = ceiling;
        self
    }

    /// Sets the ROE floor.
    #[must_use]
    pub const fn with_roe_floor(mut self, floor: f64) -> Self {
        self.roe_floor = floor;
        self
    }

    /// Sets the ROCE floor.
    #[must_use]
    pub const fn with_roce_floor(mut self, floor: f64) -> Self {
        self.roce_floor = floor;
        self
    }

    /// Checks the invariants and returns the config unchanged when they hold.
    pub fn validate(self) -> Result<Self> {
        if self.profitable_years == 0 {
            return Err(DataError::InvalidParameter(
                "profitable_years must be at least 1".to_string(),
            ));
        }
        if !self.debt_to_equity_ceiling.is_finite() || self.debt_to_equity_ceiling <= 0.0 {
            return Err(DataError::InvalidParameter(format!(
                "debt_to_equity_ceiling must be a positive number, got {}",
                self.debt_to_equity_ceiling
            )));
        }
        if !self.roe_floor.is_finite() || !self.roce_floor.is_finite() {
            return Err(DataError::InvalidParameter(
                "return floors must be finite fractions".to_string(),
            ));
        }
        Ok(self)
    }
}
