//! Comparable field values for sorting by an arbitrary field name.

use core::cmp::Ordering;

use chrono::NaiveDate;

/// Value of a single transaction field, borrowed from the record.
///
/// Produced by [`super::Transaction::field`]. Values of different
/// variants order by variant rank: missing, number, date, invalid date,
/// text. Within a variant the natural order of the value applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'tx> {
    /// The record has no such field, or it is not comparable.
    Missing,
    /// Numeric value.
    Number(f64),
    /// A parseable calendar date.
    Date(NaiveDate),
    /// A `date` field that could not be parsed.
    InvalidDate(&'tx str),
    /// Text value, compared by code point.
    Text(&'tx str),
}

impl FieldValue<'_> {
    /// Position of the variant in the cross-variant order.
    const fn rank(&self) -> u8 {
        match *self {
            Self::Missing => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::InvalidDate(_) => 3,
            Self::Text(_) => 4,
        }
    }

    /// Total order over field values.
    ///
    /// Numbers use IEEE total ordering so NaN never breaks a sort. Invalid
    /// dates compare equal to each other and keep their input order.
    #[inline]
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Self::Number(left), Self::Number(right)) => left.total_cmp(&right),
            (Self::Date(left), Self::Date(right)) => left.cmp(&right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Converts a loosely-typed stored JSON value.
    ///
    /// Booleans count as `0`/`1`; `null`, arrays and objects are missing.
    #[inline]
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> FieldValue<'_> {
        if let Some(number) = value.as_f64() {
            FieldValue::Number(number)
        } else if let Some(text) = value.as_str() {
            FieldValue::Text(text)
        } else if let Some(flag) = value.as_bool() {
            FieldValue::Number(if flag { 1.0_f64 } else { 0.0_f64 })
        } else {
            FieldValue::Missing
        }
    }
}
