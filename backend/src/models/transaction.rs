//! Transaction model
//!
//! A proposed point-to-point payment produced by the settlement engine:
//! debtor pays creditor, reducing both net balances toward zero. The engine
//! only computes what is owed; moving the money (and marking it paid or
//! verified) happens in the calling service.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A proposed payment from one participant to another
///
/// Invariant: `amount` is strictly positive and never exceeds
/// min(|debtor balance|, creditor balance) at the time it is emitted.
///
/// # Example
/// ```
/// use bill_split_core_rs::Transaction;
///
/// let tx = Transaction::new("alice".to_string(), "bob".to_string(), 3_000);
/// assert_eq!(tx.from_participant(), "alice");
/// assert_eq!(tx.to_participant(), "bob");
/// assert_eq!(tx.amount(), 3_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier (UUID)
    id: String,

    /// Paying participant (the debtor)
    from_participant: String,

    /// Receiving participant (the creditor)
    to_participant: String,

    /// Payment amount (i64 cents, strictly positive)
    amount: i64,
}

impl Transaction {
    pub fn new(from_participant: String, to_participant: String, amount: i64) -> Self {
        debug_assert!(amount > 0, "transaction amount must be positive");
        Self {
            id: Uuid::new_v4().to_string(),
            from_participant,
            to_participant,
            amount,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from_participant(&self) -> &str {
        &self.from_participant
    }

    pub fn to_participant(&self) -> &str {
        &self.to_participant
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }
}
