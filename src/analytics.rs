//! Pure calculations over transaction lists.
//!
//! Nothing here mutates its input, touches storage, or fails. Every
//! function accepts any iterator of borrowed [`Transaction`]s and returns a
//! fresh value, so the caller keeps full ownership of its canonical list.
//!
//! Two families of ordering live side by side:
//!
//! - [`filter_and_sort`] sorts **ascending** by an arbitrary field name via
//!   [`ascending_by_field`].
//! - [`sort_for_display`] backs the transaction table and orders dates and
//!   amounts **largest-first** via [`newest_first`], [`largest_first`] and
//!   [`alphabetical`].
//!
//! Both sorts are stable: records with equal keys keep their input order.

use core::cmp::Ordering;

use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

use crate::models::{DisplaySort, FilterType, FinancialSummary, Transaction};

/// Filters by amount sign, then sorts ascending by the named field.
///
/// `sort_key` may name any field of the record (`date`, `amount`,
/// `description`, `key`, `type`, or an extra stored field). An unknown key
/// leaves the filtered records in input order.
///
/// # Examples
///
/// ```
/// use fintrack_rs::analytics::filter_and_sort;
/// use fintrack_rs::models::{FilterType, Transaction};
///
/// let txs = vec![
///     Transaction::new("1".into(), "Venda", 200.0, "2025-03-29"),
///     Transaction::new("2".into(), "Compra", -50.0, "2025-03-28"),
/// ];
/// let income = filter_and_sort(&txs, Some(FilterType::Income), "date");
/// assert_eq!(income.len(), 1);
/// ```
#[inline]
#[must_use]
pub fn filter_and_sort<'txs, I>(
    transactions: I,
    filter: Option<FilterType>,
    sort_key: &str,
) -> Vec<Transaction>
where
    I: IntoIterator<Item = &'txs Transaction>,
{
    let mut selected = select(transactions, filter);
    selected.sort_by(|left, right| ascending_by_field(left, right, sort_key));
    selected
}

/// Filters by amount sign, then applies the table ordering.
#[inline]
#[must_use]
pub fn sort_for_display<'txs, I>(
    transactions: I,
    filter: Option<FilterType>,
    sort: DisplaySort,
) -> Vec<Transaction>
where
    I: IntoIterator<Item = &'txs Transaction>,
{
    let mut selected = select(transactions, filter);
    match sort {
        DisplaySort::Date => selected.sort_by(newest_first),
        DisplaySort::Amount => selected.sort_by(largest_first),
        DisplaySort::Description => selected.sort_by(alphabetical),
    }
    selected
}

/// Net sum of all amounts, unrounded. `0` for an empty list.
///
/// This is not guaranteed to equal [`FinancialSummary::balance`], which is
/// derived from separately rounded totals.
#[inline]
#[must_use]
pub fn calculate_balance<'txs, I>(transactions: I) -> f64
where
    I: IntoIterator<Item = &'txs Transaction>,
{
    transactions
        .into_iter()
        .fold(0.0_f64, |acc, tx| acc + tx.amount)
}

/// Computes income, expenses, balance and savings rate.
///
/// Income and expenses are rounded to cents first; the balance is derived
/// from those rounded totals and rounded again. The savings rate is `0`
/// when income is `0`, including for an empty list.
#[inline]
#[must_use]
pub fn calculate_financial_summary<'txs, I>(transactions: I) -> FinancialSummary
where
    I: IntoIterator<Item = &'txs Transaction>,
{
    let (income_total, expense_total) =
        transactions
            .into_iter()
            .fold((0.0_f64, 0.0_f64), |(income_acc, expense_acc), tx| {
                if tx.is_income() {
                    (income_acc + tx.amount, expense_acc)
                } else if tx.is_expense() {
                    (income_acc, expense_acc + tx.amount.abs())
                } else {
                    (income_acc, expense_acc)
                }
            });

    let income = round_to_cents(income_total);
    let expenses = round_to_cents(expense_total);
    let balance = round_to_cents(income - expenses);
    let savings_rate = if income > 0.0_f64 {
        round_to_cents(balance / income * 100.0_f64)
    } else {
        0.0_f64
    };

    FinancialSummary {
        income,
        expenses,
        balance,
        savings_rate,
    }
}

/// Rounds to two decimal places, halves away from zero.
#[inline]
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    // Adding zero turns a rounded -0.0 into 0.0.
    (value * 100.0_f64).round() / 100.0_f64 + 0.0_f64
}

/// Generic ascending comparator over the field named `key`.
#[inline]
#[must_use]
pub fn ascending_by_field(left: &Transaction, right: &Transaction, key: &str) -> Ordering {
    left.field(key).total_cmp(&right.field(key))
}

/// Most recent date first. Unparseable dates go last.
#[inline]
#[must_use]
pub fn newest_first(left: &Transaction, right: &Transaction) -> Ordering {
    match (left.parsed_date(), right.parsed_date()) {
        (Some(left_date), Some(right_date)) => right_date.cmp(&left_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Largest amount first.
#[inline]
#[must_use]
pub fn largest_first(left: &Transaction, right: &Transaction) -> Ordering {
    right.amount.total_cmp(&left.amount)
}

/// Alphabetical order by description, ignoring case and accents.
///
/// `Água` files under `a`, not after `z`. Descriptions that only differ in
/// case or accents fall back to their raw text.
#[inline]
#[must_use]
pub fn alphabetical(left: &Transaction, right: &Transaction) -> Ordering {
    folded(&left.description)
        .cmp(&folded(&right.description))
        .then_with(|| left.description.cmp(&right.description))
}

/// Lowercased text with combining marks stripped after NFD decomposition.
fn folded(text: &str) -> String {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Clones the records that pass the sign filter, preserving order.
fn select<'txs, I>(transactions: I, filter: Option<FilterType>) -> Vec<Transaction>
where
    I: IntoIterator<Item = &'txs Transaction>,
{
    transactions
        .into_iter()
        .filter(|tx| filter.is_none_or(|kind| kind.accepts(tx.amount)))
        .cloned()
        .collect()
}
