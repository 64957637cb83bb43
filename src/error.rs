//! Error types for the finance tracker.
//!
//! The analytics functions never fail; these errors come only from the
//! storage backends and from validating a new ledger entry.

use crate::models::TransactionKey;

/// All errors that can occur outside the pure analytics layer.
#[derive(Debug, thiserror::Error)]
pub enum FintrackError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// A new entry was rejected before a transaction was constructed.
    #[error("invalid entry: {0}")]
    Validation(#[from] EntryError),

    /// No stored transaction has the given key.
    #[error("transaction not found: {0}")]
    NotFound(TransactionKey),
}

/// Reasons a new ledger entry is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    /// The description is empty or whitespace.
    #[error("description is required")]
    MissingDescription,
    /// The amount is exactly zero.
    #[error("amount must not be zero")]
    ZeroAmount,
    /// The amount is NaN or infinite.
    #[error("amount must be a finite number")]
    NonFiniteAmount,
    /// No date was supplied.
    #[error("date is required")]
    MissingDate,
}

/// Convenience alias for results in this crate.
pub type Result<T> = core::result::Result<T, FintrackError>;
