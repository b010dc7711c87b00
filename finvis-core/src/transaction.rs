//! Transaction record: the atomic entry of a ledger.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provenance tag set on rows produced by the CSV importer.
pub const CSV_IMPORT_SOURCE: &str = "csv-import";

/// A dated monetary event, tagged with optional provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier for this record
    pub id: String,
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Merchant or sender
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Advisory 3-letter code; never converted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Where the record came from (e.g. "csv-import")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Shared by every instance generated from one recurring template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_group_id: Option<String>,
}

/// Generate a fresh opaque identifier for a transaction or recurring group.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Transaction {
    /// Create a transaction with a freshly generated id
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self::with_id(new_id(), date, description, amount)
    }

    /// Create a transaction with a caller-supplied id
    pub fn with_id(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            description: description.into(),
            amount,
            category: None,
            currency: None,
            source: None,
            recurring_group_id: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.recurring_group_id = Some(group_id.into());
        self
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Calendar month key, `YYYY-MM`
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.date.year(), self.date.month())
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Canonical `YYYY-MM-DD` rendering of the date
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transaction_creation() {
        let txn = Transaction::new(date(2024, 1, 15), "Coffee Shop", -4.5);
        assert!(txn.is_expense());
        assert!(!txn.is_income());
        assert_eq!(txn.abs_amount(), 4.5);
        assert_eq!(txn.month_key(), "2024-01");
        assert_eq!(txn.iso_date(), "2024-01-15");
        assert!(!txn.id.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Transaction::new(date(2024, 1, 15), "A", 1.0);
        let b = Transaction::new(date(2024, 1, 15), "A", 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_json_shape() {
        let txn = Transaction::with_id("t-1", date(2024, 3, 1), "Rent", -1200.0)
            .with_source(CSV_IMPORT_SOURCE)
            .with_group("g-1");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["source"], "csv-import");
        assert_eq!(json["recurringGroupId"], "g-1");
        assert!(json.get("category").is_none());
        assert!(json.get("currency").is_none());
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let json = r#"{"id":"x","date":"2024-02-29","description":"Leap","amount":12.5}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.date, date(2024, 2, 29));
        assert_eq!(txn.source, None);
        assert_eq!(txn.recurring_group_id, None);
    }
}
