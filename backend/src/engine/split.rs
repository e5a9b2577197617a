//! Split Engine
//!
//! Turns a receipt total (or itemized lines) plus a split policy into a
//! breakdown of exact per-participant shares. This is where every cent of
//! the total must be accounted for:
//!
//! - **Equal**: floor division, then one extra cent to each of the first
//!   `remainder` participants in input order. Sum == total exactly.
//! - **Percentage**: round-half-up per share, then the residual from
//!   per-entry rounding is spread cent-wise over the largest shares
//!   (largest-remainder correction), clamped so no share goes negative.
//!   Sum == total exactly.
//! - **Custom**: caller amounts are authoritative; validated against the
//!   total within tolerance, never adjusted.
//! - **ItemBased**: a share is the sum of assigned line totals; the entry
//!   sum *is* the effective total, and a supplied receipt total that
//!   disagrees produces a non-fatal warning.
//!
//! # Critical Invariants
//!
//! 1. **Conservation**: checked before any breakdown is returned
//! 2. **Determinism**: remainder assignment follows the stable participant
//!    input order, never random selection
//! 3. **Purity**: no state, no lookups; the caller passes resolved values

use crate::config::EngineConfig;
use crate::engine::EngineWarning;
use crate::models::split::{
    percent_of, Breakdown, CustomAmount, ItemAssignment, PercentShare, ShareEntry, SplitError,
    SplitPolicy, SplitType,
};
use crate::models::money::apply_bps;
use crate::validation::{assert_conservation, assert_non_negative};
use std::collections::HashSet;

/// A computed breakdown plus the non-fatal warnings raised on the way
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeResult {
    pub breakdown: Breakdown,
    pub warnings: Vec<EngineWarning>,
}

/// Compute a per-participant breakdown for one split
///
/// `total` is the receipt total in cents. It is required and strictly
/// positive for equal and percentage splits, required but allowed to be
/// zero for custom splits (zero amounts against a zero total is a legal
/// boundary case), and optional for item-based splits, where the assigned
/// line totals are authoritative.
///
/// # Errors
///
/// Caller-input errors (`EmptyParticipants`, `NonPositiveTotal`, the
/// `invalid_policy` family) are returned before any computation. A
/// `ConservationViolation` is an engine defect and never expected in
/// normal operation.
///
/// # Example
///
/// ```
/// use bill_split_core_rs::{compute, EngineConfig, SplitPolicy};
///
/// let participants = vec!["a".to_string(), "b".to_string(), "c".to_string()];
/// let result = compute(
///     Some(10_000),
///     &SplitPolicy::Equal,
///     &participants,
///     &EngineConfig::default(),
/// )
/// .unwrap();
///
/// let amounts: Vec<i64> = result.breakdown.entries().iter().map(|e| e.amount()).collect();
/// assert_eq!(amounts, vec![3_334, 3_333, 3_333]);
/// ```
pub fn compute(
    total: Option<i64>,
    policy: &SplitPolicy,
    participants: &[String],
    config: &EngineConfig,
) -> Result<ComputeResult, SplitError> {
    if participants.is_empty() {
        return Err(SplitError::EmptyParticipants);
    }

    match policy {
        SplitPolicy::Equal => {
            let total = require_positive_total(total, SplitType::Equal)?;
            let breakdown = compute_equal(total, participants);
            assert_conservation(&breakdown, total, 0)?;
            Ok(ComputeResult {
                breakdown,
                warnings: Vec::new(),
            })
        }
        SplitPolicy::Percentage { shares } => {
            let total = require_positive_total(total, SplitType::Percentage)?;
            let breakdown = compute_percentage(total, shares, participants, config)?;
            assert_conservation(&breakdown, total, 0)?;
            Ok(ComputeResult {
                breakdown,
                warnings: Vec::new(),
            })
        }
        SplitPolicy::Custom { amounts } => {
            let total = total.ok_or(SplitError::MissingTotal {
                split_type: SplitType::Custom,
            })?;
            if total < 0 {
                return Err(SplitError::NonPositiveTotal { total });
            }
            let breakdown = compute_custom(total, amounts, participants, config)?;
            assert_conservation(&breakdown, total, config.tolerance_cents)?;
            Ok(ComputeResult {
                breakdown,
                warnings: Vec::new(),
            })
        }
        SplitPolicy::ItemBased { assignments } => {
            if let Some(total) = total {
                if total < 0 {
                    return Err(SplitError::NonPositiveTotal { total });
                }
            }
            let (breakdown, warnings) =
                compute_item_based(total, assignments, participants, config)?;
            assert_conservation(&breakdown, breakdown.total(), 0)?;
            Ok(ComputeResult {
                breakdown,
                warnings,
            })
        }
    }
}

fn require_positive_total(total: Option<i64>, split_type: SplitType) -> Result<i64, SplitError> {
    let total = total.ok_or(SplitError::MissingTotal { split_type })?;
    if total <= 0 {
        return Err(SplitError::NonPositiveTotal { total });
    }
    Ok(total)
}

// ============================================================================
// Equal
// ============================================================================

/// Floor division plus deterministic odd-cent assignment
///
/// `base = total / n` in cents; the `total - base * n` leftover cents go one
/// each to the first participants in input order. 100.00 across 3 gives
/// [33.34, 33.33, 33.33], never a dropped cent.
fn compute_equal(total: i64, participants: &[String]) -> Breakdown {
    let n = participants.len() as i64;
    let base = total / n;
    let remainder = (total - base * n) as usize;

    let entries = participants
        .iter()
        .enumerate()
        .map(|(index, participant_id)| {
            let amount = if index < remainder { base + 1 } else { base };
            ShareEntry::new(participant_id.clone(), amount, percent_of(amount, total))
        })
        .collect();

    Breakdown::new(SplitType::Equal, total, entries)
}

// ============================================================================
// Percentage
// ============================================================================

/// Round-half-up per share, largest-remainder correction for the drift
///
/// Per-entry rounding can drift the sum by up to one cent per participant;
/// the residual is spread one cent at a time over the entries in
/// descending-amount order so the breakdown sums to the total exactly.
/// Overshoot cents are never taken from an entry already at zero, so no
/// share goes negative even when the total is smaller than the rounding
/// drift.
fn compute_percentage(
    total: i64,
    shares: &[PercentShare],
    participants: &[String],
    config: &EngineConfig,
) -> Result<Breakdown, SplitError> {
    check_hint_coverage(shares.iter().map(|s| s.participant_id.as_str()), participants)?;

    for share in shares {
        if share.percent_bps < 0 {
            return Err(SplitError::NegativePercent {
                participant_id: share.participant_id.clone(),
                percent_bps: share.percent_bps,
            });
        }
    }

    let sum_bps: i64 = shares.iter().map(|s| s.percent_bps).sum();
    if (sum_bps - 10_000).abs() > config.percent_tolerance_bps {
        return Err(SplitError::PercentSumMismatch { sum_bps });
    }

    let mut entries: Vec<ShareEntry> = participants
        .iter()
        .map(|participant_id| {
            let share = hint_for(participant_id, shares, |s| &s.participant_id)?;
            let amount = apply_bps(total, share.percent_bps);
            Ok(ShareEntry::new(
                participant_id.clone(),
                amount,
                share.percent_bps,
            ))
        })
        .collect::<Result<_, SplitError>>()?;

    // Largest-remainder correction: spread the rounding drift one cent at a
    // time, largest entries first (stable, so ties follow input order). When
    // removing overshoot cents, entries already at zero are skipped.
    let mut residual = total - entries.iter().map(|e| e.amount()).sum::<i64>();
    if residual != 0 {
        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by_key(|&index| std::cmp::Reverse(entries[index].amount()));

        let step = residual.signum();
        while residual != 0 {
            for &index in &order {
                if residual == 0 {
                    break;
                }
                if step < 0 && entries[index].amount() == 0 {
                    continue;
                }
                entries[index].adjust_amount(step);
                residual -= step;
            }
        }
    }

    Ok(Breakdown::new(SplitType::Percentage, total, entries))
}

// ============================================================================
// Custom
// ============================================================================

/// Caller-supplied amounts, validated but never adjusted
fn compute_custom(
    total: i64,
    amounts: &[CustomAmount],
    participants: &[String],
    config: &EngineConfig,
) -> Result<Breakdown, SplitError> {
    check_hint_coverage(
        amounts.iter().map(|a| a.participant_id.as_str()),
        participants,
    )?;

    for custom in amounts {
        assert_non_negative(custom.amount)?;
    }

    let sum: i64 = amounts.iter().map(|a| a.amount).sum();
    if (sum - total).abs() > config.tolerance_cents {
        return Err(SplitError::CustomSumMismatch { sum, total });
    }

    let entries = participants
        .iter()
        .map(|participant_id| {
            let custom = hint_for(participant_id, amounts, |a| &a.participant_id)?;
            Ok(ShareEntry::new(
                participant_id.clone(),
                custom.amount,
                percent_of(custom.amount, total),
            ))
        })
        .collect::<Result<_, SplitError>>()?;

    Ok(Breakdown::new(SplitType::Custom, total, entries))
}

// ============================================================================
// Item-Based
// ============================================================================

/// Per-participant sums of assigned line totals
///
/// Participants with no assigned items get a zero share so the breakdown
/// stays ordered over the full participant list. The entry sum is the
/// effective total; a supplied receipt total that disagrees beyond the
/// tolerance raises a non-fatal `TotalMismatch` warning.
fn compute_item_based(
    supplied_total: Option<i64>,
    assignments: &[ItemAssignment],
    participants: &[String],
    config: &EngineConfig,
) -> Result<(Breakdown, Vec<EngineWarning>), SplitError> {
    let known: HashSet<&str> = participants.iter().map(String::as_str).collect();
    for assignment in assignments {
        if !known.contains(assignment.participant_id.as_str()) {
            return Err(SplitError::UnknownParticipant {
                participant_id: assignment.participant_id.clone(),
            });
        }
        assert_non_negative(assignment.unit_price)?;
        if assignment.quantity <= 0 {
            return Err(SplitError::InvalidQuantity {
                quantity: assignment.quantity,
            });
        }
    }

    let item_total = sum_line_totals(assignments.iter())?;

    let entries = participants
        .iter()
        .map(|participant_id| {
            let items: Vec<ItemAssignment> = assignments
                .iter()
                .filter(|a| &a.participant_id == participant_id)
                .cloned()
                .collect();
            let amount = sum_line_totals(items.iter())?;
            Ok(ShareEntry::new(
                participant_id.clone(),
                amount,
                percent_of(amount, item_total),
            )
            .with_items(items))
        })
        .collect::<Result<_, SplitError>>()?;

    let mut warnings = Vec::new();
    if let Some(supplied) = supplied_total {
        if (supplied - item_total).abs() > config.tolerance_cents {
            warnings.push(EngineWarning::TotalMismatch {
                item_total,
                supplied_total: supplied,
            });
        }
    }

    Ok((
        Breakdown::new(SplitType::ItemBased, item_total, entries),
        warnings,
    ))
}

/// Sum line totals with the money module's overflow discipline
fn sum_line_totals<'a>(
    assignments: impl Iterator<Item = &'a ItemAssignment>,
) -> Result<i64, SplitError> {
    let mut sum: i64 = 0;
    for assignment in assignments {
        let overflow = || SplitError::AmountOverflow {
            participant_id: assignment.participant_id.clone(),
        };
        let line = assignment.line_total().ok_or_else(overflow)?;
        sum = sum.checked_add(line).ok_or_else(overflow)?;
    }
    Ok(sum)
}

// ============================================================================
// Hint Lookup
// ============================================================================

/// Reject hints that reference unknown participants or repeat one
fn check_hint_coverage<'a>(
    hint_ids: impl Iterator<Item = &'a str>,
    participants: &[String],
) -> Result<(), SplitError> {
    let known: HashSet<&str> = participants.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for id in hint_ids {
        if !known.contains(id) {
            return Err(SplitError::UnknownParticipant {
                participant_id: id.to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(SplitError::DuplicateShare {
                participant_id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Find the single hint for a participant, or fail with `MissingShare`
fn hint_for<'a, T>(
    participant_id: &str,
    hints: &'a [T],
    id_of: impl Fn(&T) -> &str,
) -> Result<&'a T, SplitError> {
    hints
        .iter()
        .find(|hint| id_of(hint) == participant_id)
        .ok_or_else(|| SplitError::MissingShare {
            participant_id: participant_id.to_string(),
        })
}
