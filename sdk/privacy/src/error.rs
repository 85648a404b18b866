//! Privacy errors
//!
//! All failures here are local and synchronous. Nothing is retried
//! internally; in particular a failed withdrawal is never re-attempted with
//! a different commitment. Callers surface these verbatim.

use thiserror::Error;

/// Errors raised by the shielded ledger and ring helpers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrivacyError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("commitment already recorded")]
    DuplicateCommitment,

    #[error("insufficient balance for requested {requested}")]
    InsufficientBalance { requested: u64 },

    #[error("commitment already spent (nullifier seen before)")]
    AlreadySpent,

    #[error("invalid ring index {index} for ring of size {ring_size}")]
    InvalidRingIndex { index: usize, ring_size: usize },
}
