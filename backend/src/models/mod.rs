//! Domain models for the bill split engine

pub mod money;
pub mod participant;
pub mod settlement;
pub mod split;
pub mod transaction;

// Re-exports
pub use money::{apply_bps, format_cents, parse_cents, round_half_up_div, MoneyError};
pub use participant::{AccountError, ParticipantAccount, ParticipantBalance};
pub use settlement::{Settlement, SettlementRecordError, SettlementStatus};
pub use split::{Breakdown, ShareEntry, Split, SplitError, SplitPolicy, SplitStatus, SplitType};
pub use transaction::Transaction;
