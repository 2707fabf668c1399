//! Price bar frequency.

use serde::{Deserialize, Serialize};

/// Granularity of price history bars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataFrequency {
    /// Daily bars.
    #[default]
    Daily,
}
