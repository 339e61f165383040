//! Calculator configuration

use serde::{Deserialize, Serialize};

/// Display settings for a calculator session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Significant digits for scalar and complex results
    pub precision: usize,
    /// Decimal places for the parts of complex equation roots
    pub root_decimals: usize,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            precision: Self::DEFAULT_PRECISION,
            root_decimals: Self::DEFAULT_ROOT_DECIMALS,
        }
    }
}

impl CalcConfig {
    /// Default significant digits
    pub const DEFAULT_PRECISION: usize = 10;
    /// Default decimals for complex roots
    pub const DEFAULT_ROOT_DECIMALS: usize = 4;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display precision (at least one digit)
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.max(1);
        self
    }

    /// Set decimals for complex roots
    #[must_use]
    pub const fn with_root_decimals(mut self, decimals: usize) -> Self {
        self.root_decimals = decimals;
        self
    }
}
