//! Personal finance tracker.
//!
//! The heart of the crate is [`analytics`]: pure functions that filter and
//! sort a list of income/expense records and compute income, expense,
//! balance and savings-rate totals. Around it sit a [`ledger`] that owns
//! the canonical list, pluggable [`storage`] backends that persist it as a
//! JSON blob, and [`display`] helpers used by the `fintrack` CLI.

pub mod analytics;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod storage;
