//! Settlement record model
//!
//! The session-scoped record that tracks actual payments against a
//! finalized split's breakdown. Each participant's progress is kept on the
//! wrapped share entries (`paid`, `due = share - paid`, derived status);
//! `total_collected` and `remaining` are maintained as running sums.
//!
//! Lifecycle: `active -> archived`, one-way. Archived settlements accept no
//! further payments.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::split::{
    PaymentStatus, ShareEntry, ShareError, Split, SplitStatus,
};

/// Settlement record lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    Active,
    Archived,
}

/// Errors that can occur on a settlement record
#[derive(Debug, Error, PartialEq)]
pub enum SettlementRecordError {
    #[error("settlement requires a finalized split: split is {status}")]
    SplitNotFinalized { status: SplitStatus },

    #[error("split has no calculated breakdown")]
    BreakdownMissing,

    #[error("settlement is archived")]
    Archived,

    #[error("no share for participant {participant_id}")]
    UnknownParticipant { participant_id: String },

    #[error("share error: {0}")]
    Share(#[from] ShareError),
}

/// Per-participant payment progress, as the calling service displays it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantProgress {
    pub participant_id: String,

    /// The participant's share of the total (i64 cents)
    pub share: i64,

    /// Paid so far (i64 cents)
    pub paid: i64,

    /// Remaining due: share - paid
    pub due: i64,

    /// Derived status (unpaid/partial/paid)
    pub status: PaymentStatus,
}

/// Payment tracking over a finalized split's breakdown
///
/// # Example
/// ```
/// use bill_split_core_rs::{EngineConfig, Settlement, Split, SplitPolicy};
///
/// let mut split = Split::new(
///     Some(6_000),
///     SplitPolicy::Equal,
///     vec!["alice".to_string(), "bob".to_string()],
/// );
/// split.calculate(&EngineConfig::default()).unwrap();
/// split.finalize().unwrap();
///
/// let mut settlement = Settlement::from_split(&split).unwrap();
/// settlement.record_payment("alice", 3_000).unwrap();
///
/// assert_eq!(settlement.total_collected(), 3_000);
/// assert_eq!(settlement.remaining(), 3_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique settlement identifier (UUID)
    id: String,

    /// The finalized split this settlement tracks
    split_id: String,

    /// The split's total (i64 cents)
    total: i64,

    /// One entry per participant, cloned from the finalized breakdown with
    /// fresh payment progress
    entries: Vec<ShareEntry>,

    /// Running sum of recorded payments (i64 cents)
    total_collected: i64,

    /// Lifecycle state
    status: SettlementStatus,
}

impl Settlement {
    /// Wrap a finalized split's breakdown into a settlement record
    pub fn from_split(split: &Split) -> Result<Self, SettlementRecordError> {
        if split.status() != SplitStatus::Finalized {
            return Err(SettlementRecordError::SplitNotFinalized {
                status: split.status(),
            });
        }
        let breakdown = split
            .breakdown()
            .ok_or(SettlementRecordError::BreakdownMissing)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            split_id: split.id().to_string(),
            total: breakdown.total(),
            entries: breakdown.entries().to_vec(),
            total_collected: 0,
            status: SettlementStatus::Active,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn split_id(&self) -> &str {
        &self.split_id
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn status(&self) -> SettlementStatus {
        self.status
    }

    pub fn entries(&self) -> &[ShareEntry] {
        &self.entries
    }

    /// Running sum of all recorded payments
    pub fn total_collected(&self) -> i64 {
        self.total_collected
    }

    /// Still outstanding across all participants: total - total_collected
    pub fn remaining(&self) -> i64 {
        self.total - self.total_collected
    }

    /// True once every share is fully paid
    pub fn is_fully_collected(&self) -> bool {
        self.entries
            .iter()
            .all(|e| e.payment_status() == PaymentStatus::Paid)
    }

    /// Record an actual payment by a participant
    ///
    /// The payment must be positive, may not exceed the participant's
    /// remaining due, and is rejected once the settlement is archived.
    pub fn record_payment(
        &mut self,
        participant_id: &str,
        amount: i64,
    ) -> Result<(), SettlementRecordError> {
        if self.status == SettlementStatus::Archived {
            return Err(SettlementRecordError::Archived);
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.participant_id() == participant_id)
            .ok_or_else(|| SettlementRecordError::UnknownParticipant {
                participant_id: participant_id.to_string(),
            })?;

        entry.record_payment(amount)?;
        self.total_collected += amount;
        Ok(())
    }

    /// Per-participant progress view for the calling service
    pub fn progress(&self) -> Vec<ParticipantProgress> {
        self.entries
            .iter()
            .map(|e| ParticipantProgress {
                participant_id: e.participant_id().to_string(),
                share: e.amount(),
                paid: e.amount_paid(),
                due: e.due(),
                status: e.payment_status(),
            })
            .collect()
    }

    /// Archive the settlement: one-way, idempotent rejection on repeat
    pub fn archive(&mut self) -> Result<(), SettlementRecordError> {
        if self.status == SettlementStatus::Archived {
            return Err(SettlementRecordError::Archived);
        }
        self.status = SettlementStatus::Archived;
        Ok(())
    }
}
