//! Participant model
//!
//! A participant is an opaque ID at the engine boundary; the calling service
//! owns names, emails and authentication. The engine only sees:
//! - `ParticipantAccount`: running totals the caller maintains across splits
//! - `ParticipantBalance`: a derived paid-minus-owed snapshot, the sole
//!   input to settlement matching
//!
//! The engines never mutate accounts themselves. A finalized split hands the
//! caller a list of owed commits, and the caller applies them here before
//! taking balance snapshots.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during account operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("amount must be non-negative: {amount}")]
    NegativeAmount { amount: i64 },
}

/// Running owed/paid totals for one participant
///
/// # Example
/// ```
/// use bill_split_core_rs::ParticipantAccount;
///
/// let mut account = ParticipantAccount::new("alice".to_string());
/// account.record_owed(5_000).unwrap();
/// account.record_paid(2_000).unwrap();
///
/// // Paid 20.00 against 50.00 owed: debtor by 30.00
/// assert_eq!(account.balance().net_balance, -3_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantAccount {
    /// Opaque participant identifier
    participant_id: String,

    /// Total committed against this participant by finalized splits (i64 cents)
    total_owed: i64,

    /// Total actually paid by this participant (i64 cents)
    total_paid: i64,
}

impl ParticipantAccount {
    /// Create a fresh account with zero totals
    pub fn new(participant_id: String) -> Self {
        Self {
            participant_id,
            total_owed: 0,
            total_paid: 0,
        }
    }

    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    pub fn total_owed(&self) -> i64 {
        self.total_owed
    }

    pub fn total_paid(&self) -> i64 {
        self.total_paid
    }

    /// Add a finalized split's share to the running owed total
    pub fn record_owed(&mut self, amount: i64) -> Result<(), AccountError> {
        if amount < 0 {
            return Err(AccountError::NegativeAmount { amount });
        }
        self.total_owed += amount;
        Ok(())
    }

    /// Add an actual payment to the running paid total
    pub fn record_paid(&mut self, amount: i64) -> Result<(), AccountError> {
        if amount < 0 {
            return Err(AccountError::NegativeAmount { amount });
        }
        self.total_paid += amount;
        Ok(())
    }

    /// Derive the net balance snapshot for settlement matching
    ///
    /// Positive = is owed money (creditor), negative = owes money (debtor),
    /// zero = settled. The balance is always derived, never stored.
    pub fn balance(&self) -> ParticipantBalance {
        ParticipantBalance {
            participant_id: self.participant_id.clone(),
            net_balance: self.total_paid - self.total_owed,
        }
    }
}

/// Derived net balance for one participant (total_paid - total_owed)
///
/// This snapshot is the only thing the settlement engine ever sees; it has
/// no link back to the account it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    /// Opaque participant identifier
    pub participant_id: String,

    /// Net balance in cents: positive = creditor, negative = debtor
    pub net_balance: i64,
}

impl ParticipantBalance {
    pub fn new(participant_id: String, net_balance: i64) -> Self {
        Self {
            participant_id,
            net_balance,
        }
    }

    /// True if this participant is owed money
    pub fn is_creditor(&self) -> bool {
        self.net_balance > 0
    }

    /// True if this participant owes money
    pub fn is_debtor(&self) -> bool {
        self.net_balance < 0
    }
}
