//! Shared invariant checks
//!
//! Small pure validators used by both engines and available to callers.
//! Every public engine entry point runs the relevant check before
//! returning a result; a silently-inconsistent breakdown must never leave
//! the engine.

use crate::engine::EngineWarning;
use crate::models::split::{Breakdown, SplitError};

/// Check that a breakdown's entry amounts account for the total
///
/// Equal, percentage and item-based breakdowns must conserve exactly
/// (tolerance 0); custom breakdowns are caller-authoritative and allowed
/// the configured tolerance.
pub fn assert_conservation(
    breakdown: &Breakdown,
    total: i64,
    tolerance_cents: i64,
) -> Result<(), SplitError> {
    let actual = breakdown.amount_sum();
    if (actual - total).abs() > tolerance_cents {
        return Err(SplitError::ConservationViolation {
            expected: total,
            actual,
        });
    }
    Ok(())
}

/// Check that an amount is not negative
pub fn assert_non_negative(amount: i64) -> Result<(), SplitError> {
    if amount < 0 {
        return Err(SplitError::NegativeAmount { amount });
    }
    Ok(())
}

/// Check that a balance sum nets to ~zero
///
/// Violations are a warning, not an error: settlement proceeds and leaves
/// the residual unmatched (documented leniency).
pub fn check_balances_close_to_zero(sum: i64, tolerance_cents: i64) -> Option<EngineWarning> {
    if sum.abs() > tolerance_cents {
        Some(EngineWarning::UnbalancedBalances { residual: sum })
    } else {
        None
    }
}
