//! Transaction model.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::{FieldValue, TransactionKey, TransactionKind};

/// Date layouts accepted for chronological comparison, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Layout used when the ledger stores a new entry's date.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A single recorded income or expense.
///
/// Only `amount` matters for calculations: a non-negative amount is
/// income, a negative amount is an expense. Fields beyond the known ones
/// are kept in `extra` so a stored record survives a load/save cycle
/// unchanged and stays sortable by any of its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifying key used for deletion.
    #[serde(default)]
    pub key: TransactionKey,
    /// Free-form label. May be empty.
    #[serde(default)]
    pub description: String,
    /// Signed amount. A stored record without one counts as zero.
    #[serde(default)]
    pub amount: f64,
    /// Date as entered (`YYYY-MM-DD` or `DD/MM/YYYY`).
    #[serde(default)]
    pub date: String,
    /// Cosmetic tag written at creation time. Never consulted; a stored
    /// tag other than `income`/`expense` is read as `None`.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<TransactionKind>,
    /// Any other fields present on the stored record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Transaction {
    /// Creates a transaction, tagging it from the amount sign.
    #[inline]
    #[must_use]
    pub fn new<D: Into<String>, T: Into<String>>(
        key: TransactionKey,
        description: D,
        amount: f64,
        date: T,
    ) -> Self {
        Self {
            key,
            description: description.into(),
            amount,
            date: date.into(),
            kind: Some(TransactionKind::from_amount(amount)),
            extra: serde_json::Map::new(),
        }
    }

    /// Returns `true` if the amount is `>= 0`.
    #[inline]
    #[must_use]
    pub fn is_income(&self) -> bool {
        self.amount >= 0.0_f64
    }

    /// Returns `true` if the amount is `< 0`.
    #[inline]
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0_f64
    }

    /// Parses the date field, or `None` if it is in no known layout.
    #[inline]
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Looks up a field by its wire name for generic sorting.
    ///
    /// `date` is compared chronologically, `amount` numerically, and
    /// `description`, `key` and `type` as text. Any other name is looked up
    /// among the extra stored fields.
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "amount" => FieldValue::Number(self.amount),
            "date" => self
                .parsed_date()
                .map_or(FieldValue::InvalidDate(&self.date), FieldValue::Date),
            "description" => FieldValue::Text(&self.description),
            "key" => FieldValue::Text(self.key.as_inner()),
            "type" => self.kind.map_or(FieldValue::Missing, |kind| {
                FieldValue::Text(match kind {
                    TransactionKind::Income => "income",
                    TransactionKind::Expense => "expense",
                })
            }),
            other => self
                .extra
                .get(other)
                .map_or(FieldValue::Missing, FieldValue::from_json),
        }
    }
}

/// Reads the `type` tag without rejecting the record over it.
fn lenient_kind<'de, D>(deserializer: D) -> Result<Option<TransactionKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(TransactionKind::deserialize(raw).ok())
}

/// Parses a date written as `YYYY-MM-DD` or `DD/MM/YYYY`.
#[inline]
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_stored_record() {
        let json = r#"{
            "key": "1743292800000",
            "description": "Salário",
            "amount": 1500,
            "date": "30/03/2025",
            "type": "income"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.key, TransactionKey::from("1743292800000"));
        assert!((tx.amount - 1500.0).abs() < f64::EPSILON);
        assert_eq!(tx.kind, Some(TransactionKind::Income));
        assert_eq!(tx.parsed_date(), NaiveDate::from_ymd_opt(2025, 3, 30));
        assert!(tx.extra.is_empty());
    }

    #[test]
    fn deserialize_amount_only_record() {
        let tx: Transaction = serde_json::from_str(r#"{"amount": -30}"#).unwrap();
        assert!(tx.is_expense());
        assert!(tx.description.is_empty());
        assert_eq!(tx.kind, None);
        assert_eq!(tx.parsed_date(), None);
    }

    #[test]
    fn foreign_type_tag_reads_as_none() {
        for tag in [r#""transfer""#, "null", "3"] {
            let json = format!(r#"{{"amount": -12.5, "type": {tag}}}"#);
            let tx: Transaction = serde_json::from_str(&json).unwrap();
            assert_eq!(tx.kind, None);
            assert!(tx.is_expense());
        }
    }

    #[test]
    fn missing_amount_counts_as_zero() {
        let tx: Transaction =
            serde_json::from_str(r#"{"description": "Pix", "date": "2025-01-01"}"#).unwrap();
        assert!(tx.amount.abs() < f64::EPSILON);
        assert!(tx.is_income());
    }

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let json = r#"{"amount": 10, "date": "2025-01-01", "category": "food"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.field("category"), FieldValue::Text("food"));
        let back: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&tx).unwrap()).unwrap();
        assert_eq!(back["category"], "food");
    }

    #[test]
    fn kind_tag_is_serialized_as_type() {
        let tx = Transaction::new("k".into(), "Compra", -50.0, "2025-03-28");
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["key"], "k");
    }

    #[test]
    fn zero_amount_is_income() {
        let tx = Transaction::new("k".into(), "Ajuste", 0.0, "2025-03-28");
        assert!(tx.is_income());
        assert!(!tx.is_expense());
    }

    #[test]
    fn field_lookup() {
        let tx = Transaction::new("k-9".into(), "Venda", 200.0, "2025-03-29");
        assert_eq!(tx.field("amount"), FieldValue::Number(200.0));
        assert_eq!(
            tx.field("date"),
            FieldValue::Date(NaiveDate::from_ymd_opt(2025, 3, 29).unwrap())
        );
        assert_eq!(tx.field("description"), FieldValue::Text("Venda"));
        assert_eq!(tx.field("key"), FieldValue::Text("k-9"));
        assert_eq!(tx.field("type"), FieldValue::Text("income"));
        assert_eq!(tx.field("nonexistent"), FieldValue::Missing);
    }

    #[test]
    fn malformed_date_is_invalid() {
        let tx = Transaction::new("k".into(), "x", 1.0, "31/02/2025");
        assert_eq!(tx.field("date"), FieldValue::InvalidDate("31/02/2025"));
    }

    #[test]
    fn parse_both_layouts() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 27);
        assert_eq!(parse_date("2025-03-27"), expected);
        assert_eq!(parse_date("27/03/2025"), expected);
        assert_eq!(parse_date(" 2025-03-27 "), expected);
        assert_eq!(parse_date("03-27-2025"), None);
    }
}
