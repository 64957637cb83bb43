//! Enumeration types for classification, filtering and display ordering.

use serde::{Deserialize, Serialize};

/// Cosmetic income/expense tag stored alongside a transaction.
///
/// The tag is derived from the amount sign when an entry is created.
/// Calculations never read it; the sign of the amount is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    /// Non-negative amount.
    Income,
    /// Negative amount.
    Expense,
}

impl TransactionKind {
    /// Derives the tag from an amount sign (`>= 0` is income).
    #[inline]
    #[must_use]
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0_f64 {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

/// Sign-based filter applied before sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// Keep amounts `>= 0`.
    Income,
    /// Keep amounts `< 0`.
    Expense,
}

impl FilterType {
    /// Accepted filter names.
    pub const NAMES: [&'static str; 2] = ["income", "expense"];

    /// Parses `"income"` or `"expense"`; anything else yields `None`.
    #[inline]
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns `true` if an amount passes this filter.
    ///
    /// A NaN amount passes neither filter.
    #[inline]
    #[must_use]
    pub fn accepts(self, amount: f64) -> bool {
        match self {
            Self::Income => amount >= 0.0_f64,
            Self::Expense => amount < 0.0_f64,
        }
    }
}

/// Ordering used by the transaction table.
///
/// Unlike the generic field sort, dates and amounts are shown
/// largest-first here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplaySort {
    /// Most recent first.
    #[default]
    Date,
    /// Largest amount first.
    Amount,
    /// Alphabetical by description.
    Description,
}

impl DisplaySort {
    /// Accepted sort names.
    pub const NAMES: [&'static str; 3] = ["date", "amount", "description"];

    /// Parses a sort name. Unknown names fall back to description order.
    #[inline]
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "date" => Self::Date,
            "amount" => Self::Amount,
            _ => Self::Description,
        }
    }

    /// Field name this ordering is based on.
    #[inline]
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Description => "description",
        }
    }
}
