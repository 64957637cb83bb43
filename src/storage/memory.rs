//! In-memory storage backend for testing.
//!
//! Provides [`InMemoryStorage`], a thread-safe in-memory implementation of
//! [`super::Storage`]. Ideal for unit tests where file I/O is undesirable.

use std::sync::Mutex;

use crate::error::{FintrackError, Result};
use crate::models::Transaction;

/// Thread-safe in-memory storage for testing.
///
/// # Example
///
/// ```rust
/// use fintrack_rs::storage::{InMemoryStorage, Storage};
///
/// let storage = InMemoryStorage::new();
/// assert!(storage.load().unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    /// Stored list, `None` until the first save.
    inner: Mutex<Option<Vec<Transaction>>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-seeded with the given list.
    #[inline]
    #[must_use]
    pub const fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            inner: Mutex::new(Some(transactions)),
        }
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R, F: FnOnce(&mut Option<Vec<Transaction>>) -> R>(&self, op: F) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(op(&mut inner))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> FintrackError {
    FintrackError::Storage(err.to_string().into())
}

impl super::Storage for InMemoryStorage {
    #[inline]
    fn load(&self) -> Result<Vec<Transaction>> {
        self.with_lock(|inner| inner.clone().unwrap_or_default())
    }

    #[inline]
    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        self.with_lock(|inner| *inner = Some(transactions.to_vec()))
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|inner| *inner = None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn test_transaction(key: &str, amount: f64) -> Transaction {
        Transaction::new(key.into(), format!("entry {key}"), amount, "2025-03-27")
    }

    #[test]
    fn empty_storage_loads_empty_list() {
        let storage = InMemoryStorage::new();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_preserves_order() {
        let storage = InMemoryStorage::new();
        let txs = vec![test_transaction("b", 1.0), test_transaction("a", -2.0)];
        storage.save(&txs).unwrap();
        assert_eq!(storage.load().unwrap(), txs);
    }

    #[test]
    fn save_replaces_previous_list() {
        let storage = InMemoryStorage::with_transactions(vec![test_transaction("old", 5.0)]);
        storage.save(&[test_transaction("new", 7.0)]).unwrap();
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].key.as_inner(), "new");
    }

    #[test]
    fn clear_removes_everything() {
        let storage = InMemoryStorage::with_transactions(vec![test_transaction("x", 1.0)]);
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn storage_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryStorage>();
    }
}
