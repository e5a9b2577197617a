//! Settlement Engine
//!
//! Turns a set of signed net balances into point-to-point payments that
//! zero everyone out. Greedy two-pointer matching over debtors and
//! creditors in caller input order:
//!
//! 1. Partition into creditors (balance > 0) and debtors (balance < 0),
//!    discarding zero balances
//! 2. Match the current debtor against the current creditor for
//!    `min(|debtor|, creditor)` and emit a transaction
//! 3. Advance past anyone whose remaining balance has fallen below the
//!    tolerance; repeat until either side is exhausted
//!
//! # Known Approximation
//!
//! This heuristic is deterministic and linear but not globally
//! transaction-count-optimal for every debt topology (the optimal matching
//! problem is NP-hard). The source system shipped the same heuristic; it is
//! preserved here as a documented limitation, not "fixed".
//!
//! Input that does not net to zero is likewise tolerated: the excess is
//! reported as an unmatched residual and surfaced as a warning, never
//! emitted as a transaction.
//!
//! # Critical Invariants
//!
//! 1. **Zero-sum**: for balanced input, applying all emitted transactions
//!    leaves every balance within the tolerance of zero (checked before
//!    return)
//! 2. **Positivity**: every emitted amount is strictly positive and never
//!    exceeds min(|debtor|, creditor) at emission time
//! 3. **Determinism**: pairing follows caller input order, the canonical
//!    order for this engine

use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::engine::EngineWarning;
use crate::models::participant::ParticipantBalance;
use crate::models::transaction::Transaction;
use crate::validation::check_balances_close_to_zero;

/// Errors that can occur during settlement matching
///
/// `DuplicateParticipant` is a caller-input error. `ConservationViolation`
/// is the engine's own post-check: balanced input that does not reduce to
/// zero is a defect and must fail loudly rather than return a silently
/// wrong transaction list.
#[derive(Debug, Error, PartialEq)]
pub enum SettlementError {
    #[error("participant {participant_id} appears more than once in the balances")]
    DuplicateParticipant { participant_id: String },

    #[error(
        "settlement conservation violated: participant {participant_id} \
         left with remaining balance {remaining}"
    )]
    ConservationViolation {
        participant_id: String,
        remaining: i64,
    },
}

impl SettlementError {
    /// Machine-readable error kind for the caller's transport mapping
    pub fn kind(&self) -> &'static str {
        match self {
            SettlementError::DuplicateParticipant { .. } => "invalid_balances",
            SettlementError::ConservationViolation { .. } => "conservation_violation",
        }
    }
}

/// Transactions plus the non-fatal findings raised on the way
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeResult {
    /// Proposed payments, in emission order
    pub transactions: Vec<Transaction>,

    /// Non-fatal findings (unbalanced input)
    pub warnings: Vec<EngineWarning>,

    /// Sum of the input balances; non-zero means that much money could not
    /// be matched and was left out of the transaction list
    pub residual: i64,
}

/// Resolve net balances into a small set of debtor-to-creditor payments
///
/// # Example
///
/// ```
/// use bill_split_core_rs::{minimize, EngineConfig, ParticipantBalance};
///
/// let balances = vec![
///     ParticipantBalance::new("a".to_string(), -5_000),
///     ParticipantBalance::new("b".to_string(), 3_000),
///     ParticipantBalance::new("c".to_string(), 2_000),
/// ];
///
/// let result = minimize(&balances, &EngineConfig::default()).unwrap();
/// assert_eq!(result.transactions.len(), 2);
/// assert_eq!(result.transactions[0].amount(), 3_000); // a -> b
/// assert_eq!(result.transactions[1].amount(), 2_000); // a -> c
/// ```
pub fn minimize(
    balances: &[ParticipantBalance],
    config: &EngineConfig,
) -> Result<MinimizeResult, SettlementError> {
    let tolerance = config.tolerance_cents;

    // Each participant must appear exactly once; a repeated id would be
    // settled row by row while the replay post-check nets it as one
    let mut seen: HashSet<&str> = HashSet::new();
    for balance in balances {
        if !seen.insert(balance.participant_id.as_str()) {
            return Err(SettlementError::DuplicateParticipant {
                participant_id: balance.participant_id.clone(),
            });
        }
    }

    let mut warnings = Vec::new();
    let sum: i64 = balances.iter().map(|b| b.net_balance).sum();
    if let Some(warning) = check_balances_close_to_zero(sum, tolerance) {
        warnings.push(warning);
    }

    // Partition in caller input order; zero balances drop out here
    let mut debtors: Vec<(&str, i64)> = balances
        .iter()
        .filter(|b| b.is_debtor())
        .map(|b| (b.participant_id.as_str(), -b.net_balance))
        .collect();
    let mut creditors: Vec<(&str, i64)> = balances
        .iter()
        .filter(|b| b.is_creditor())
        .map(|b| (b.participant_id.as_str(), b.net_balance))
        .collect();

    let mut transactions = Vec::new();
    let mut debtor_index = 0;
    let mut creditor_index = 0;

    while debtor_index < debtors.len() && creditor_index < creditors.len() {
        let (debtor_id, owed) = debtors[debtor_index];
        let (creditor_id, due) = creditors[creditor_index];

        let settlement_amount = owed.min(due);
        if settlement_amount > 0 {
            transactions.push(Transaction::new(
                debtor_id.to_string(),
                creditor_id.to_string(),
                settlement_amount,
            ));
        }

        debtors[debtor_index].1 = owed - settlement_amount;
        creditors[creditor_index].1 = due - settlement_amount;

        if is_settled(debtors[debtor_index].1, tolerance) {
            debtor_index += 1;
        }
        if is_settled(creditors[creditor_index].1, tolerance) {
            creditor_index += 1;
        }
    }

    verify_zero_sum(balances, &transactions, sum, tolerance)?;

    Ok(MinimizeResult {
        transactions,
        warnings,
        residual: sum,
    })
}

/// A remaining balance counts as settled at zero, or below the tolerance
///
/// The tolerance clause guards sub-cent drift in float implementations;
/// integer cents cannot drift, so at the default tolerance this is an
/// exact-zero check and no settleable cent is ever forgiven.
fn is_settled(remaining: i64, tolerance: i64) -> bool {
    remaining == 0 || remaining < tolerance
}

/// Independent post-check: replay the transactions over the input balances
///
/// For balanced input every participant must land within the tolerance of
/// zero. Unbalanced input is exempt, since its residual is unmatchable by
/// construction (documented leniency carried over from the source system).
fn verify_zero_sum(
    balances: &[ParticipantBalance],
    transactions: &[Transaction],
    sum: i64,
    tolerance: i64,
) -> Result<(), SettlementError> {
    if sum.abs() > tolerance {
        return Ok(());
    }

    let mut remaining: HashMap<&str, i64> = balances
        .iter()
        .map(|b| (b.participant_id.as_str(), b.net_balance))
        .collect();

    for tx in transactions {
        // Paying its debt moves the debtor toward zero from below,
        // receiving moves the creditor toward zero from above
        if let Some(balance) = remaining.get_mut(tx.from_participant()) {
            *balance += tx.amount();
        }
        if let Some(balance) = remaining.get_mut(tx.to_participant()) {
            *balance -= tx.amount();
        }
    }

    for balance in balances {
        let end = remaining[balance.participant_id.as_str()];
        if end.abs() > tolerance {
            return Err(SettlementError::ConservationViolation {
                participant_id: balance.participant_id.clone(),
                remaining: end,
            });
        }
    }
    Ok(())
}
