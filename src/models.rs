//! Data models for the finance tracker.
//!
//! This module contains the transaction record handed to the analytics
//! functions, its identifying key, the classification and ordering
//! enumerations, and the summary value they produce.

mod enums;
mod field;
mod ids;
mod summary;
mod transaction;

pub use chrono::NaiveDate;
pub use enums::{DisplaySort, FilterType, TransactionKind};
pub use field::FieldValue;
pub use ids::TransactionKey;
pub use summary::FinancialSummary;
pub use transaction::{DISPLAY_DATE_FORMAT, Transaction, parse_date};
