//! Bill Split Core - Rust Engine
//!
//! Split-calculation and settlement-reconciliation engine for shared bills.
//! Divides a receipt total (or itemized lines) among participants under a
//! split policy, and resolves net balances into a small set of point-to-point
//! payments.
//!
//! # Architecture
//!
//! - **models**: Domain types (Split, Breakdown, Participant, Settlement, Transaction)
//! - **engine**: The two pure engines (split computation, settlement matching)
//! - **validation**: Shared invariant checks run at every engine boundary
//! - **fingerprint**: Deterministic breakdown hashing (tamper/replay guard)
//! - **config**: Explicit tolerance constants
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. Every cent of a total is accounted for (conservation, checked before return)
//! 3. Both engines are pure and deterministic: identical input, identical output
//! 4. Lifecycle transitions are one-way (finalized splits are never recalculated)

// Module declarations
pub mod config;
pub mod engine;
pub mod fingerprint;
pub mod models;
pub mod validation;

// Re-exports for convenience
pub use config::EngineConfig;
pub use engine::{
    settle::{minimize, MinimizeResult, SettlementError},
    split::{compute, ComputeResult},
    EngineWarning,
};
pub use fingerprint::breakdown_fingerprint;
pub use models::{
    participant::{AccountError, ParticipantAccount, ParticipantBalance},
    settlement::{ParticipantProgress, Settlement, SettlementRecordError, SettlementStatus},
    split::{
        Breakdown, CustomAmount, ItemAssignment, OwedCommit, PaymentStatus, PercentShare,
        ShareEntry, ShareError, Split, SplitError, SplitPolicy, SplitStatus, SplitType,
    },
    transaction::Transaction,
};
