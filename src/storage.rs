//! Pluggable storage backends for the transaction list.
//!
//! The whole list is persisted as one JSON blob under a fixed name. It is
//! read once when a [`crate::ledger::Ledger`] opens and rewritten after
//! every add or delete.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStorage;
pub use memory::InMemoryStorage;

use crate::error::Result;
use crate::models::Transaction;

/// Name under which the transaction list is stored.
pub const STORAGE_KEY: &str = "transactions";

/// Blocking storage backend holding the full transaction list.
///
/// All methods take `&self`; implementations use interior mutability
/// (e.g. `Mutex`) for thread-safe mutation.
pub trait Storage: core::fmt::Debug + Send + Sync {
    /// Returns the stored list in insertion order.
    ///
    /// Returns an empty list if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read or the stored blob
    /// is not valid JSON.
    fn load(&self) -> Result<Vec<Transaction>>;

    /// Replaces the stored list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn save(&self, transactions: &[Transaction]) -> Result<()>;

    /// Removes the stored list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn clear(&self) -> Result<()>;
}
