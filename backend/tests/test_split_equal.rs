//! Equal split tests
//!
//! The equal policy carries the trickiest conservation property: floor
//! division plus deterministic assignment of the leftover cents to the
//! first participants in input order. Sum must equal the total exactly,
//! never "to within tolerance".

use bill_split_core_rs::{
    breakdown_fingerprint, compute, EngineConfig, SplitError, SplitPolicy, SplitType,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn participants(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{}", i)).collect()
}

fn equal_amounts(total: i64, n: usize) -> Vec<i64> {
    let result = compute(
        Some(total),
        &SplitPolicy::Equal,
        &participants(n),
        &EngineConfig::default(),
    )
    .expect("equal split should succeed");
    assert!(result.warnings.is_empty(), "equal split never warns");
    result.breakdown.entries().iter().map(|e| e.amount()).collect()
}

// ============================================================================
// Conservation & Remainder Assignment
// ============================================================================

#[test]
fn test_hundred_across_three() {
    // 100.00 / 3: the odd cent goes to the first participant
    assert_eq!(equal_amounts(10_000, 3), vec![3_334, 3_333, 3_333]);
}

#[test]
fn test_sum_is_exact() {
    for (total, n) in [(10_000, 3), (9_999, 7), (1, 1), (101, 2), (77_777, 13)] {
        let amounts = equal_amounts(total, n);
        assert_eq!(
            amounts.iter().sum::<i64>(),
            total,
            "sum must equal total exactly for total={} n={}",
            total,
            n
        );
    }
}

#[test]
fn test_spread_is_at_most_one_cent() {
    let amounts = equal_amounts(9_998, 7);
    let max = amounts.iter().max().unwrap();
    let min = amounts.iter().min().unwrap();
    assert!(max - min <= 1, "shares may differ by at most one cent");
}

#[test]
fn test_remainder_goes_to_first_k_in_order() {
    // 1.01 across 2: remainder 1 cent, first participant gets it
    assert_eq!(equal_amounts(101, 2), vec![51, 50]);

    // 1.05 across 4: base 26, remainder 1
    assert_eq!(equal_amounts(105, 4), vec![27, 26, 26, 26]);
}

#[test]
fn test_single_participant_gets_everything() {
    assert_eq!(equal_amounts(12_345, 1), vec![12_345]);
}

#[test]
fn test_total_smaller_than_group() {
    // 0.02 across 3: two participants get a cent, the last gets nothing
    assert_eq!(equal_amounts(2, 3), vec![1, 1, 0]);
}

// ============================================================================
// Breakdown Shape
// ============================================================================

#[test]
fn test_breakdown_metadata() {
    let result = compute(
        Some(10_000),
        &SplitPolicy::Equal,
        &participants(3),
        &EngineConfig::default(),
    )
    .unwrap();

    assert_eq!(result.breakdown.split_type(), SplitType::Equal);
    assert_eq!(result.breakdown.total(), 10_000);
    assert_eq!(result.breakdown.entries().len(), 3);

    // Entries preserve caller input order
    let ids: Vec<&str> = result
        .breakdown
        .entries()
        .iter()
        .map(|e| e.participant_id())
        .collect();
    assert_eq!(ids, vec!["p0", "p1", "p2"]);

    // Informational percentage: 3334/10000 = 33.34%
    assert_eq!(result.breakdown.entries()[0].percent_bps(), 3_334);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_identical_input_identical_output() {
    let config = EngineConfig::default();
    let group = participants(7);

    let first = compute(Some(99_999), &SplitPolicy::Equal, &group, &config).unwrap();
    let second = compute(Some(99_999), &SplitPolicy::Equal, &group, &config).unwrap();

    assert_eq!(first.breakdown, second.breakdown);
    assert_eq!(
        breakdown_fingerprint(&first.breakdown).unwrap(),
        breakdown_fingerprint(&second.breakdown).unwrap(),
        "repeated computation must fingerprint identically"
    );
}

// ============================================================================
// Input Validation
// ============================================================================

#[test]
fn test_empty_participants_rejected() {
    let result = compute(
        Some(10_000),
        &SplitPolicy::Equal,
        &[],
        &EngineConfig::default(),
    );
    assert_eq!(result.unwrap_err(), SplitError::EmptyParticipants);
}

#[test]
fn test_non_positive_total_rejected() {
    for total in [0, -1, -10_000] {
        let result = compute(
            Some(total),
            &SplitPolicy::Equal,
            &participants(2),
            &EngineConfig::default(),
        );
        assert_eq!(result.unwrap_err(), SplitError::NonPositiveTotal { total });
    }
}

#[test]
fn test_missing_total_rejected() {
    let result = compute(
        None,
        &SplitPolicy::Equal,
        &participants(2),
        &EngineConfig::default(),
    );
    assert_eq!(
        result.unwrap_err(),
        SplitError::MissingTotal {
            split_type: SplitType::Equal
        }
    );
}

#[test]
fn test_error_kinds_for_transport_mapping() {
    assert_eq!(SplitError::EmptyParticipants.kind(), "empty_participants");
    assert_eq!(
        SplitError::NonPositiveTotal { total: 0 }.kind(),
        "non_positive_total"
    );
    assert_eq!(
        SplitError::ConservationViolation {
            expected: 1,
            actual: 2
        }
        .kind(),
        "conservation_violation"
    );
}
