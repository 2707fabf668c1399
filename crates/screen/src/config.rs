//! Run configuration.

use std::time::Duration;

use screen_core::{DataError, Result, ThresholdConfig};

/// Default market suffix for NSE listings.
pub const DEFAULT_MARKET_SUFFIX: &str = ".NS";

/// Default pause after each evaluated symbol.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Default pause after a symbol with no data.
pub const DEFAULT_UNAVAILABLE_PAUSE: Duration = Duration::from_millis(200);

/// Default pause between growth-screen requests.
pub const DEFAULT_GROWTH_PAUSE: Duration = Duration::from_millis(150);

/// Configuration for one fundamental screening run.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenConfig {
    /// Predicate thresholds.
    pub thresholds: ThresholdConfig,
    /// Suffix appended to every symbol before lookup.
    pub market_suffix: String,
    /// Pause after each evaluated symbol.
    pub pause: Duration,
    /// Pause after a symbol for which nothing was fetched.
    pub unavailable_pause: Duration,
    /// Symbols fetched concurrently; 1 keeps the run strictly sequential.
    pub max_in_flight: usize,
    /// Screen only the first `n` prepared symbols.
    pub limit: Option<usize>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            market_suffix: DEFAULT_MARKET_SUFFIX.to_string(),
            pause: DEFAULT_PAUSE,
            unavailable_pause: DEFAULT_UNAVAILABLE_PAUSE,
            max_in_flight: 1,
            limit: None,
        }
    }
}

impl ScreenConfig {
    /// Sets the thresholds.
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the market suffix.
    #[must_use]
    pub fn with_market_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.market_suffix = suffix.into();
        self
    }

    /// Sets both pauses.
    #[must_use]
    pub const fn with_pauses(mut self, pause: Duration, unavailable_pause: Duration) -> Self {
        self.pause = pause;
        self.unavailable_pause = unavailable_pause;
        self
    }

    /// Sets the number of symbols fetched concurrently.
    #[must_use]
    pub const fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Restricts the run to the first `limit` symbols.
    #[must_use]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Validates the thresholds and concurrency settings.
    pub fn validate(self) -> Result<Self> {
        self.thresholds.validate()?;
        if self.max_in_flight == 0 {
            return Err(DataError::InvalidParameter(
                "max_in_flight must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}
