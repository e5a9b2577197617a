//! Engine Module
//!
//! The two pure computation engines composed by the calling service:
//! - **split**: total + policy + participants -> exact per-participant breakdown
//! - **settle**: net balances -> greedy debtor/creditor payment matching
//!
//! # Critical Invariants
//!
//! 1. **Purity**: No side effects, no lookups, no clock, no randomness;
//!    identical input produces byte-identical output
//! 2. **Conservation**: Every result passes the relevant validator before
//!    it is returned; a failed check is an engine defect, never swallowed
//! 3. **Warnings are surfaced**: Non-fatal findings (total mismatch,
//!    unbalanced balances) ride alongside the result instead of aborting it

pub mod settle;
pub mod split;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::money::format_cents;

/// Non-fatal findings surfaced alongside an engine result
///
/// Warnings never abort a computation; the caller decides whether to show
/// them, log them, or reject the input at its own boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineWarning {
    /// Item-based split: assigned line totals disagree with the supplied
    /// receipt total by more than the tolerance
    TotalMismatch {
        item_total: i64,
        supplied_total: i64,
    },

    /// Settlement input does not net to ~zero; the residual is left
    /// unmatched and never emitted as a transaction
    UnbalancedBalances { residual: i64 },
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineWarning::TotalMismatch {
                item_total,
                supplied_total,
            } => write!(
                f,
                "assigned items sum to {}, receipt total is {}",
                format_cents(*item_total),
                format_cents(*supplied_total)
            ),
            EngineWarning::UnbalancedBalances { residual } => write!(
                f,
                "balances do not net to zero: residual {}",
                format_cents(*residual)
            ),
        }
    }
}
