//! Engine configuration
//!
//! Reconciliation tolerances used by both engines. The source system buried
//! an epsilon of 0.01 inside its validation checks; here the value is an
//! explicit constant so tests and callers agree on exactly how much drift
//! is acceptable.

use serde::{Deserialize, Serialize};

/// Tolerances for split validation and settlement matching
///
/// # Example
/// ```
/// use bill_split_core_rs::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.tolerance_cents, 1);
/// assert_eq!(config.percent_tolerance_bps, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum acceptable drift between a breakdown sum and its total,
    /// and the "close enough to zero" threshold in settlement matching
    /// (i64 cents; 1 = 0.01 in currency units)
    pub tolerance_cents: i64,

    /// Maximum acceptable drift of a percentage policy's share sum from
    /// 100% (basis points; 1 bp = 0.01 percentage points)
    pub percent_tolerance_bps: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance_cents: 1,
            percent_tolerance_bps: 1,
        }
    }
}
