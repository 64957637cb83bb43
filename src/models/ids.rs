//! Newtype wrapper for transaction keys.
//!
//! Keys are opaque strings handed out by the ledger when an entry is
//! created. Analytics never look at them; they only exist so the UI layer
//! can address a single record for deletion.

use serde::{Deserialize, Serialize};

/// Identifying key of a stored transaction.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TransactionKey(String);

impl TransactionKey {
    /// Creates a new key from the given string.
    #[inline]
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner string.
    #[inline]
    #[must_use]
    pub fn as_inner(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for TransactionKey {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for TransactionKey {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TransactionKey {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
