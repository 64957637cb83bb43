//! Canonical transaction list with write-back persistence.
//!
//! A [`Ledger`] plays the role of the UI state layer: it loads the list
//! from a [`Storage`] backend once, validates and appends new entries,
//! deletes entries by key, and writes the whole list back after every
//! mutation. Views and totals are delegated to [`crate::analytics`].

use chrono::Utc;

use crate::analytics;
use crate::error::{EntryError, FintrackError, Result};
use crate::models::{
    DISPLAY_DATE_FORMAT, DisplaySort, FilterType, FinancialSummary, NaiveDate, Transaction,
    TransactionKey,
};
use crate::storage::Storage;

/// Unvalidated input from the entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Free-form label; must not be blank.
    pub description: String,
    /// Signed amount; must be finite and non-zero.
    pub amount: f64,
    /// Date of the movement; required.
    pub date: Option<NaiveDate>,
}

impl NewTransaction {
    /// Creates a form entry.
    #[inline]
    #[must_use]
    pub fn new<D: Into<String>>(description: D, amount: f64, date: Option<NaiveDate>) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
        }
    }

    /// Checks the entry and returns its date.
    ///
    /// # Errors
    ///
    /// Returns the first failed rule: blank description, zero or
    /// non-finite amount, or missing date.
    #[inline]
    pub fn validate(&self) -> core::result::Result<NaiveDate, EntryError> {
        if self.description.trim().is_empty() {
            return Err(EntryError::MissingDescription);
        }
        if !self.amount.is_finite() {
            return Err(EntryError::NonFiniteAmount);
        }
        if self.amount == 0.0_f64 {
            return Err(EntryError::ZeroAmount);
        }
        self.date.ok_or(EntryError::MissingDate)
    }
}

/// Owner of the canonical transaction list.
///
/// # Example
///
/// ```rust
/// use fintrack_rs::ledger::{Ledger, NewTransaction};
/// use fintrack_rs::models::NaiveDate;
/// use fintrack_rs::storage::InMemoryStorage;
///
/// let mut ledger = Ledger::open(InMemoryStorage::new()).unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 3, 30);
/// ledger.add(NewTransaction::new("Salário", 1500.0, date)).unwrap();
/// assert_eq!(ledger.summary().income, 1500.0);
/// ```
#[derive(Debug)]
pub struct Ledger<S: Storage> {
    /// Persistence backend.
    storage: S,
    /// Canonical list in insertion order.
    transactions: Vec<Transaction>,
}

impl<S: Storage> Ledger<S> {
    /// Loads the stored list and takes ownership of the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to load.
    #[inline]
    pub fn open(storage: S) -> Result<Self> {
        let transactions = storage.load()?;
        tracing::debug!(count = transactions.len(), "ledger opened");
        Ok(Self {
            storage,
            transactions,
        })
    }

    /// Returns the canonical list in insertion order.
    #[inline]
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Returns the storage backend.
    #[inline]
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Validates an entry, appends it and writes the list back.
    ///
    /// The new record gets a fresh key (current time in milliseconds,
    /// bumped past any existing key), a kind tag derived from the amount
    /// sign, and its date in `DD/MM/YYYY` form.
    ///
    /// # Errors
    ///
    /// Returns [`FintrackError::Validation`] for an invalid entry, or a
    /// storage error if the write fails. The list is unchanged on error.
    #[inline]
    pub fn add(&mut self, entry: NewTransaction) -> Result<Transaction> {
        let date = entry.validate()?;
        let key = self.fresh_key();
        let transaction = Transaction::new(
            key,
            entry.description,
            entry.amount,
            date.format(DISPLAY_DATE_FORMAT).to_string(),
        );

        let mut updated = self.transactions.clone();
        updated.push(transaction.clone());
        self.storage.save(&updated)?;
        self.transactions = updated;

        tracing::info!(key = %transaction.key, amount = transaction.amount, "transaction added");
        Ok(transaction)
    }

    /// Removes the transaction with the given key and writes the list back.
    ///
    /// # Errors
    ///
    /// Returns [`FintrackError::NotFound`] for an unknown key, or a storage
    /// error if the write fails. The list is unchanged on error.
    #[inline]
    pub fn delete(&mut self, key: &TransactionKey) -> Result<Transaction> {
        let Some(removed) = self.transactions.iter().find(|tx| tx.key == *key).cloned() else {
            return Err(FintrackError::NotFound(key.clone()));
        };

        let updated: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|tx| tx.key != *key)
            .cloned()
            .collect();
        self.storage.save(&updated)?;
        self.transactions = updated;

        tracing::info!(%key, "transaction deleted");
        Ok(removed)
    }

    /// Returns the list filtered by sign and in table order.
    #[inline]
    #[must_use]
    pub fn view(&self, filter: Option<FilterType>, sort: DisplaySort) -> Vec<Transaction> {
        analytics::sort_for_display(&self.transactions, filter, sort)
    }

    /// Returns the list filtered by sign and sorted ascending by any field.
    #[inline]
    #[must_use]
    pub fn sorted_by(&self, filter: Option<FilterType>, sort_key: &str) -> Vec<Transaction> {
        analytics::filter_and_sort(&self.transactions, filter, sort_key)
    }

    /// Totals over the whole list.
    #[inline]
    #[must_use]
    pub fn summary(&self) -> FinancialSummary {
        analytics::calculate_financial_summary(&self.transactions)
    }

    /// Unrounded net sum over the whole list.
    #[inline]
    #[must_use]
    pub fn balance(&self) -> f64 {
        analytics::calculate_balance(&self.transactions)
    }

    /// Generates a key not used by any stored transaction.
    fn fresh_key(&self) -> TransactionKey {
        let mut millis = Utc::now().timestamp_millis();
        while self
            .transactions
            .iter()
            .any(|tx| tx.key.as_inner() == millis.to_string())
        {
            millis = millis.saturating_add(1);
        }
        TransactionKey::new(millis.to_string())
    }
}
