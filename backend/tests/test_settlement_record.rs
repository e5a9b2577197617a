//! Settlement record tests
//!
//! Payment tracking over a finalized split: per-participant progress,
//! running total_collected/remaining sums, and the one-way active ->
//! archived lifecycle.

use bill_split_core_rs::{
    EngineConfig, PaymentStatus, Settlement, SettlementRecordError, SettlementStatus, ShareError,
    Split, SplitPolicy, SplitStatus,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn finalized_split(total: i64) -> Split {
    let mut split = Split::new(
        Some(total),
        SplitPolicy::Equal,
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
    );
    split.calculate(&EngineConfig::default()).unwrap();
    split.finalize().unwrap();
    split
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_requires_finalized_split() {
    let mut split = Split::new(
        Some(9_000),
        SplitPolicy::Equal,
        vec!["a".to_string(), "b".to_string()],
    );
    split.calculate(&EngineConfig::default()).unwrap();

    assert_eq!(
        Settlement::from_split(&split).unwrap_err(),
        SettlementRecordError::SplitNotFinalized {
            status: SplitStatus::Calculated
        }
    );
}

#[test]
fn test_fresh_settlement_state() {
    let split = finalized_split(9_000);
    let settlement = Settlement::from_split(&split).unwrap();

    assert_eq!(settlement.split_id(), split.id());
    assert_eq!(settlement.status(), SettlementStatus::Active);
    assert_eq!(settlement.total(), 9_000);
    assert_eq!(settlement.total_collected(), 0);
    assert_eq!(settlement.remaining(), 9_000);
    assert!(!settlement.is_fully_collected());

    for progress in settlement.progress() {
        assert_eq!(progress.paid, 0);
        assert_eq!(progress.due, progress.share);
        assert_eq!(progress.status, PaymentStatus::Unpaid);
    }
}

// ============================================================================
// Recording Payments
// ============================================================================

#[test]
fn test_running_sums_track_every_payment() {
    let split = finalized_split(9_000);
    let mut settlement = Settlement::from_split(&split).unwrap();

    settlement.record_payment("a", 1_000).unwrap();
    assert_eq!(settlement.total_collected(), 1_000);
    assert_eq!(settlement.remaining(), 8_000);

    settlement.record_payment("b", 3_000).unwrap();
    assert_eq!(settlement.total_collected(), 4_000);
    assert_eq!(settlement.remaining(), 5_000);

    // total_collected + remaining == total, always
    assert_eq!(
        settlement.total_collected() + settlement.remaining(),
        settlement.total()
    );
}

#[test]
fn test_status_derivation() {
    let split = finalized_split(9_000); // 30.00 each
    let mut settlement = Settlement::from_split(&split).unwrap();

    settlement.record_payment("a", 1_000).unwrap();
    let progress = settlement.progress();
    assert_eq!(progress[0].status, PaymentStatus::Partial);
    assert_eq!(progress[0].due, 2_000);
    assert_eq!(progress[1].status, PaymentStatus::Unpaid);

    settlement.record_payment("a", 2_000).unwrap();
    assert_eq!(settlement.progress()[0].status, PaymentStatus::Paid);
}

#[test]
fn test_fully_collected() {
    let split = finalized_split(9_000);
    let mut settlement = Settlement::from_split(&split).unwrap();

    for id in ["a", "b", "c"] {
        settlement.record_payment(id, 3_000).unwrap();
    }
    assert!(settlement.is_fully_collected());
    assert_eq!(settlement.remaining(), 0);
}

// ============================================================================
// Guards
// ============================================================================

#[test]
fn test_overpayment_rejected() {
    let split = finalized_split(9_000);
    let mut settlement = Settlement::from_split(&split).unwrap();

    settlement.record_payment("a", 2_000).unwrap();
    assert_eq!(
        settlement.record_payment("a", 1_500).unwrap_err(),
        SettlementRecordError::Share(ShareError::PaymentExceedsShare {
            amount: 1_500,
            due: 1_000
        })
    );
    // Rejected payment leaves the sums untouched
    assert_eq!(settlement.total_collected(), 2_000);
}

#[test]
fn test_non_positive_payment_rejected() {
    let split = finalized_split(9_000);
    let mut settlement = Settlement::from_split(&split).unwrap();

    for amount in [0, -500] {
        assert_eq!(
            settlement.record_payment("a", amount).unwrap_err(),
            SettlementRecordError::Share(ShareError::InvalidPaymentAmount { amount })
        );
    }
}

#[test]
fn test_unknown_participant_rejected() {
    let split = finalized_split(9_000);
    let mut settlement = Settlement::from_split(&split).unwrap();

    assert_eq!(
        settlement.record_payment("ghost", 100).unwrap_err(),
        SettlementRecordError::UnknownParticipant {
            participant_id: "ghost".to_string()
        }
    );
}

// ============================================================================
// Archiving
// ============================================================================

#[test]
fn test_archive_is_one_way() {
    let split = finalized_split(9_000);
    let mut settlement = Settlement::from_split(&split).unwrap();

    settlement.archive().unwrap();
    assert_eq!(settlement.status(), SettlementStatus::Archived);

    assert_eq!(
        settlement.archive().unwrap_err(),
        SettlementRecordError::Archived
    );
}

#[test]
fn test_archived_settlement_accepts_no_payments() {
    let split = finalized_split(9_000);
    let mut settlement = Settlement::from_split(&split).unwrap();
    settlement.archive().unwrap();

    assert_eq!(
        settlement.record_payment("a", 100).unwrap_err(),
        SettlementRecordError::Archived
    );
    assert_eq!(settlement.total_collected(), 0);
}
