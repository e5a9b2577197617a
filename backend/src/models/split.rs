//! Split model
//!
//! A split is one bill-division computation attached to a single receipt or
//! raw total. It carries:
//! - The split policy (equal, percentage, custom, item_based)
//! - The ordered participant list (opaque IDs)
//! - The computed breakdown (one ShareEntry per participant)
//! - A one-way lifecycle: pending -> calculated -> finalized (or cancelled)
//!
//! Finalizing commits each entry's amount as an `OwedCommit` for the caller
//! to apply to its participant accounts; the split itself never touches
//! account state. A finalized split is immutable: recalculation is rejected
//! and a fingerprint check guards against in-place edits between calculate
//! and finalize.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::engine::EngineWarning;
use crate::models::money::round_half_up_div;

// ============================================================================
// Split Policy
// ============================================================================

/// Wire-level split type tag (equal|percentage|custom|item_based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    Equal,
    Percentage,
    Custom,
    ItemBased,
}

impl SplitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Equal => "equal",
            SplitType::Percentage => "percentage",
            SplitType::Custom => "custom",
            SplitType::ItemBased => "item_based",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One participant's percentage share, in basis points (10000 = 100%)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentShare {
    pub participant_id: String,

    /// Share in basis points; 6000 = 60%
    pub percent_bps: i64,
}

/// One participant's caller-supplied absolute share (i64 cents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAmount {
    pub participant_id: String,
    pub amount: i64,
}

/// One receipt line assigned to a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAssignment {
    pub participant_id: String,

    /// Item label as it appeared on the receipt, if known
    pub label: Option<String>,

    /// Unit price (i64 cents)
    pub unit_price: i64,

    /// Quantity assigned; must be positive
    pub quantity: i64,
}

impl ItemAssignment {
    /// Line total: unit_price x quantity, `None` if it leaves the i64
    /// cent range
    pub fn line_total(&self) -> Option<i64> {
        self.unit_price.checked_mul(self.quantity)
    }
}

/// How a total is divided among participants
///
/// Serialized with the wire tags the calling service uses:
/// `equal`, `percentage`, `custom`, `item_based`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Divide the total evenly; odd cents go to the first participants
    /// in input order
    Equal,

    /// Per-participant percentages that must sum to 100% within tolerance
    Percentage { shares: Vec<PercentShare> },

    /// Per-participant absolute amounts that must sum to the total within
    /// tolerance; amounts are authoritative, no adjustment is applied
    Custom { amounts: Vec<CustomAmount> },

    /// Per-participant receipt lines; a share is the sum of assigned
    /// line totals
    ItemBased { assignments: Vec<ItemAssignment> },
}

impl SplitPolicy {
    pub fn split_type(&self) -> SplitType {
        match self {
            SplitPolicy::Equal => SplitType::Equal,
            SplitPolicy::Percentage { .. } => SplitType::Percentage,
            SplitPolicy::Custom { .. } => SplitType::Custom,
            SplitPolicy::ItemBased { .. } => SplitType::ItemBased,
        }
    }
}

// ============================================================================
// Share Entries & Breakdown
// ============================================================================

/// Payment progress of one share
///
/// Always a pure function of amount_paid vs amount, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

/// Errors that can occur when recording a payment against a share
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareError {
    #[error("payment amount must be positive: {amount}")]
    InvalidPaymentAmount { amount: i64 },

    #[error("payment {amount} exceeds remaining due {due}")]
    PaymentExceedsShare { amount: i64, due: i64 },
}

/// One row of a breakdown: a participant's computed share
///
/// # Example
/// ```
/// use bill_split_core_rs::{PaymentStatus, ShareEntry};
///
/// let mut entry = ShareEntry::new("alice".to_string(), 2_500, 5_000);
/// assert_eq!(entry.payment_status(), PaymentStatus::Unpaid);
///
/// entry.record_payment(1_000).unwrap();
/// assert_eq!(entry.payment_status(), PaymentStatus::Partial);
/// assert_eq!(entry.due(), 1_500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareEntry {
    /// Opaque participant identifier
    participant_id: String,

    /// Computed share (i64 cents)
    amount: i64,

    /// Informational share of the total, in basis points
    percent_bps: i64,

    /// Receipt lines backing this share (item_based splits only)
    items: Vec<ItemAssignment>,

    /// Amount actually paid so far (i64 cents); never exceeds `amount`
    amount_paid: i64,
}

impl ShareEntry {
    pub fn new(participant_id: String, amount: i64, percent_bps: i64) -> Self {
        Self {
            participant_id,
            amount,
            percent_bps,
            items: Vec::new(),
            amount_paid: 0,
        }
    }

    /// Attach the receipt lines that produced this share
    pub fn with_items(mut self, items: Vec<ItemAssignment>) -> Self {
        self.items = items;
        self
    }

    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn percent_bps(&self) -> i64 {
        self.percent_bps
    }

    pub fn items(&self) -> &[ItemAssignment] {
        &self.items
    }

    pub fn amount_paid(&self) -> i64 {
        self.amount_paid
    }

    /// Remaining due: amount - amount_paid
    pub fn due(&self) -> i64 {
        self.amount - self.amount_paid
    }

    /// Derive payment status from amounts
    pub fn payment_status(&self) -> PaymentStatus {
        if self.amount_paid == 0 && self.amount != 0 {
            PaymentStatus::Unpaid
        } else if self.amount_paid < self.amount {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Paid
        }
    }

    /// Fold a rounding residual into this share (largest-remainder correction)
    pub(crate) fn adjust_amount(&mut self, delta: i64) {
        self.amount += delta;
    }

    /// Record a payment against this share
    ///
    /// The payment must be positive and may not push amount_paid past the
    /// share amount.
    pub fn record_payment(&mut self, amount: i64) -> Result<(), ShareError> {
        if amount <= 0 {
            return Err(ShareError::InvalidPaymentAmount { amount });
        }
        let due = self.due();
        if amount > due {
            return Err(ShareError::PaymentExceedsShare { amount, due });
        }
        self.amount_paid += amount;
        Ok(())
    }
}

/// Ordered per-participant shares plus the originating total
///
/// Invariant: the entry amounts sum to `total` exactly for equal,
/// percentage and item_based splits, and to within the configured
/// tolerance for custom splits. Checked by
/// `validation::assert_conservation` before any breakdown leaves the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    split_type: SplitType,

    /// The total being divided (i64 cents)
    total: i64,

    /// One entry per participant, in caller input order
    entries: Vec<ShareEntry>,
}

impl Breakdown {
    pub fn new(split_type: SplitType, total: i64, entries: Vec<ShareEntry>) -> Self {
        Self {
            split_type,
            total,
            entries,
        }
    }

    pub fn split_type(&self) -> SplitType {
        self.split_type
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn entries(&self) -> &[ShareEntry] {
        &self.entries
    }

    /// Look up a participant's entry
    pub fn entry(&self, participant_id: &str) -> Option<&ShareEntry> {
        self.entries
            .iter()
            .find(|e| e.participant_id() == participant_id)
    }

    /// Sum of all entry amounts (i64 cents)
    pub fn amount_sum(&self) -> i64 {
        self.entries.iter().map(|e| e.amount()).sum()
    }
}

// ============================================================================
// Split Lifecycle
// ============================================================================

/// Split lifecycle state
///
/// `pending -> calculated -> finalized`, or `-> cancelled` from any
/// non-final state. Finalized and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStatus {
    Pending,
    Calculated,
    Finalized,
    Cancelled,
}

impl SplitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitStatus::Pending => "pending",
            SplitStatus::Calculated => "calculated",
            SplitStatus::Finalized => "finalized",
            SplitStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SplitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during split computation and lifecycle operations
#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("participant list is empty")]
    EmptyParticipants,

    #[error("total must be positive: {total}")]
    NonPositiveTotal { total: i64 },

    #[error("a receipt total is required for {split_type} splits")]
    MissingTotal { split_type: SplitType },

    #[error("percentages must sum to 100%: got {sum_bps} bps")]
    PercentSumMismatch { sum_bps: i64 },

    #[error("negative percentage for {participant_id}: {percent_bps} bps")]
    NegativePercent {
        participant_id: String,
        percent_bps: i64,
    },

    #[error("custom amounts sum to {sum}, receipt total is {total}")]
    CustomSumMismatch { sum: i64, total: i64 },

    #[error("amount must be non-negative: {amount}")]
    NegativeAmount { amount: i64 },

    #[error("item quantity must be positive: {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("item amounts for {participant_id} overflow the i64 cent range")]
    AmountOverflow { participant_id: String },

    #[error("no share provided for participant {participant_id}")]
    MissingShare { participant_id: String },

    #[error("duplicate share for participant {participant_id}")]
    DuplicateShare { participant_id: String },

    #[error("share references unknown participant {participant_id}")]
    UnknownParticipant { participant_id: String },

    #[error("invalid lifecycle transition: {from} -> {to}")]
    InvalidTransition { from: SplitStatus, to: SplitStatus },

    #[error("split has no calculated breakdown")]
    BreakdownMissing,

    #[error("breakdown changed since calculation: expected fingerprint {expected}, got {actual}")]
    FingerprintMismatch { expected: String, actual: String },

    #[error("conservation violated: breakdown sums to {actual}, expected {expected}")]
    ConservationViolation { expected: i64, actual: i64 },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl SplitError {
    /// Machine-readable error kind for the caller's transport mapping
    ///
    /// Validation kinds map to client errors (4xx) in the calling service;
    /// `conservation_violation` and `internal` are engine defects (5xx).
    pub fn kind(&self) -> &'static str {
        match self {
            SplitError::EmptyParticipants => "empty_participants",
            SplitError::NonPositiveTotal { .. } | SplitError::MissingTotal { .. } => {
                "non_positive_total"
            }
            SplitError::PercentSumMismatch { .. }
            | SplitError::NegativePercent { .. }
            | SplitError::CustomSumMismatch { .. }
            | SplitError::NegativeAmount { .. }
            | SplitError::InvalidQuantity { .. }
            | SplitError::AmountOverflow { .. }
            | SplitError::MissingShare { .. }
            | SplitError::DuplicateShare { .. }
            | SplitError::UnknownParticipant { .. } => "invalid_policy",
            SplitError::InvalidTransition { .. } => "invalid_transition",
            SplitError::BreakdownMissing => "breakdown_missing",
            SplitError::FingerprintMismatch { .. } | SplitError::ConservationViolation { .. } => {
                "conservation_violation"
            }
            SplitError::Serialization(_) => "internal",
        }
    }
}

/// A finalized share the caller must apply to a participant account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwedCommit {
    pub participant_id: String,
    pub amount: i64,
}

/// One bill-division computation attached to a receipt or raw total
///
/// # Example
/// ```
/// use bill_split_core_rs::{EngineConfig, Split, SplitPolicy, SplitStatus};
///
/// let mut split = Split::new(
///     Some(10_000),
///     SplitPolicy::Equal,
///     vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
/// );
///
/// split.calculate(&EngineConfig::default()).unwrap();
/// assert_eq!(split.status(), SplitStatus::Calculated);
///
/// let commits = split.finalize().unwrap();
/// assert_eq!(split.status(), SplitStatus::Finalized);
/// assert_eq!(commits.iter().map(|c| c.amount).sum::<i64>(), 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Unique split identifier (UUID)
    id: String,

    /// Receipt total (i64 cents); optional for item_based splits
    receipt_total: Option<i64>,

    /// Division policy
    policy: SplitPolicy,

    /// Ordered participant IDs; order fixes remainder assignment
    participants: Vec<String>,

    /// Computed breakdown, present from `calculated` onward
    breakdown: Option<Breakdown>,

    /// Fingerprint of the breakdown at calculation time
    fingerprint: Option<String>,

    /// Lifecycle state
    status: SplitStatus,
}

impl Split {
    pub fn new(receipt_total: Option<i64>, policy: SplitPolicy, participants: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            receipt_total,
            policy,
            participants,
            breakdown: None,
            fingerprint: None,
            status: SplitStatus::Pending,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn receipt_total(&self) -> Option<i64> {
        self.receipt_total
    }

    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn breakdown(&self) -> Option<&Breakdown> {
        self.breakdown.as_ref()
    }

    pub fn status(&self) -> SplitStatus {
        self.status
    }

    /// Run the split engine and store the breakdown
    ///
    /// Allowed from `pending` (first calculation) and `calculated`
    /// (recalculation after a policy edit). A finalized or cancelled split
    /// is never recalculated in place.
    ///
    /// Returns the non-fatal warnings the engine surfaced (e.g. an
    /// item-based total mismatch).
    pub fn calculate(&mut self, config: &EngineConfig) -> Result<Vec<EngineWarning>, SplitError> {
        match self.status {
            SplitStatus::Pending | SplitStatus::Calculated => {}
            from => {
                return Err(SplitError::InvalidTransition {
                    from,
                    to: SplitStatus::Calculated,
                })
            }
        }

        let result = crate::engine::split::compute(
            self.receipt_total,
            &self.policy,
            &self.participants,
            config,
        )?;

        self.fingerprint = Some(crate::fingerprint::breakdown_fingerprint(&result.breakdown)?);
        self.breakdown = Some(result.breakdown);
        self.status = SplitStatus::Calculated;
        Ok(result.warnings)
    }

    /// Finalize the split: one-way, only from `calculated`
    ///
    /// Verifies the stored breakdown still matches its calculation-time
    /// fingerprint, then returns one `OwedCommit` per entry for the caller
    /// to apply to its participant accounts. On any error the split is left
    /// unchanged.
    pub fn finalize(&mut self) -> Result<Vec<OwedCommit>, SplitError> {
        if self.status != SplitStatus::Calculated {
            return Err(SplitError::InvalidTransition {
                from: self.status,
                to: SplitStatus::Finalized,
            });
        }

        let breakdown = self.breakdown.as_ref().ok_or(SplitError::BreakdownMissing)?;
        let expected = self
            .fingerprint
            .clone()
            .ok_or(SplitError::BreakdownMissing)?;
        let actual = crate::fingerprint::breakdown_fingerprint(breakdown)?;
        if actual != expected {
            return Err(SplitError::FingerprintMismatch { expected, actual });
        }

        let commits = breakdown
            .entries()
            .iter()
            .map(|entry| OwedCommit {
                participant_id: entry.participant_id().to_string(),
                amount: entry.amount(),
            })
            .collect();

        self.status = SplitStatus::Finalized;
        Ok(commits)
    }

    /// Cancel the split: one-way, from `pending` or `calculated`
    pub fn cancel(&mut self) -> Result<(), SplitError> {
        match self.status {
            SplitStatus::Pending | SplitStatus::Calculated => {
                self.status = SplitStatus::Cancelled;
                Ok(())
            }
            from => Err(SplitError::InvalidTransition {
                from,
                to: SplitStatus::Cancelled,
            }),
        }
    }
}

/// Informational percentage of `amount` against `total`, in basis points
///
/// Returns 0 for a zero total (item-based splits with no priced items).
pub(crate) fn percent_of(amount: i64, total: i64) -> i64 {
    if total == 0 {
        0
    } else {
        round_half_up_div(amount as i128 * 10_000, total as i128)
    }
}
