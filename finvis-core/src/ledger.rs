//! Ledger: the user's complete set of transactions, held as a value.
//!
//! Every mutation returns a new `Ledger`; the receiver is never changed. The
//! only invariant is id uniqueness, checked on construction, on add and when
//! deserializing a persisted ledger.
//!
//! Group deletion: a transaction carrying a `recurring_group_id` is removed
//! together with every sibling sharing that id (see [`Ledger::removal_targets`]).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::transaction::Transaction;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Transaction>", into = "Vec<Transaction>")]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl TryFrom<Vec<Transaction>> for Ledger {
    type Error = LedgerError;

    fn try_from(transactions: Vec<Transaction>) -> Result<Self, Self::Error> {
        Ledger::from_transactions(transactions)
    }
}

impl From<Ledger> for Vec<Transaction> {
    fn from(ledger: Ledger) -> Self {
        ledger.transactions
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger, rejecting duplicate ids.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self, LedgerError> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for txn in &transactions {
            if !seen.insert(txn.id.as_str()) {
                return Err(LedgerError::DuplicateId(txn.id.clone()));
            }
        }
        Ok(Self { transactions })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All members of a recurring group
    pub fn group(&self, group_id: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.recurring_group_id.as_deref() == Some(group_id))
            .collect()
    }

    /// Transactions ordered by date, newest first (ties keep insertion order).
    pub fn sorted_newest_first(&self) -> Vec<&Transaction> {
        let mut out: Vec<_> = self.transactions.iter().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }

    /// Return a new ledger with one more transaction.
    pub fn with_transaction(&self, txn: Transaction) -> Result<Self, LedgerError> {
        self.with_transactions(vec![txn])
    }

    /// Return a new ledger with a batch appended. All or nothing: if any id
    /// collides (with the ledger or within the batch) nothing is added.
    pub fn with_transactions(&self, batch: Vec<Transaction>) -> Result<Self, LedgerError> {
        let mut seen: HashSet<&str> = self.transactions.iter().map(|t| t.id.as_str()).collect();
        for txn in &batch {
            if !seen.insert(txn.id.as_str()) {
                return Err(LedgerError::DuplicateId(txn.id.clone()));
            }
        }

        let mut transactions = self.transactions.clone();
        transactions.extend(batch);
        Ok(Self { transactions })
    }

    /// Ids that removing `id` would delete: the whole recurring group when the
    /// target belongs to one, otherwise just the target.
    pub fn removal_targets(&self, id: &str) -> Result<Vec<String>, LedgerError> {
        let target = self
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        match target.recurring_group_id.as_deref() {
            Some(group_id) => Ok(self
                .group(group_id)
                .into_iter()
                .map(|t| t.id.clone())
                .collect()),
            None => Ok(vec![target.id.clone()]),
        }
    }

    /// Return a new ledger without `id` (and without its recurring siblings).
    pub fn without(&self, id: &str) -> Result<Self, LedgerError> {
        let targets: HashSet<String> = self.removal_targets(id)?.into_iter().collect();
        let transactions = self
            .transactions
            .iter()
            .filter(|t| !targets.contains(&t.id))
            .cloned()
            .collect();
        Ok(Self { transactions })
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Ledger {
        Ledger::from_transactions(vec![
            Transaction::with_id("a", date(2024, 1, 5), "Groceries", -50.0),
            Transaction::with_id("b", date(2024, 2, 1), "Rent", -900.0).with_group("rent"),
            Transaction::with_id("c", date(2024, 3, 1), "Rent", -900.0).with_group("rent"),
            Transaction::with_id("d", date(2024, 1, 31), "Paycheck", 2000.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Ledger::from_transactions(vec![
            Transaction::with_id("x", date(2024, 1, 1), "A", 1.0),
            Transaction::with_id("x", date(2024, 1, 2), "B", 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateId(id) if id == "x"));
    }

    #[test]
    fn test_add_returns_new_value() {
        let ledger = sample();
        let next = ledger
            .with_transaction(Transaction::with_id("e", date(2024, 4, 1), "Bonus", 300.0))
            .unwrap();
        assert_eq!(ledger.len(), 4);
        assert_eq!(next.len(), 5);
        assert!(next.contains("e"));
    }

    #[test]
    fn test_batch_add_is_all_or_nothing() {
        let ledger = sample();
        let batch = vec![
            Transaction::with_id("e", date(2024, 4, 1), "Bonus", 300.0),
            Transaction::with_id("a", date(2024, 4, 2), "Clash", -1.0),
        ];
        assert!(matches!(
            ledger.with_transactions(batch),
            Err(LedgerError::DuplicateId(_))
        ));

        let dup_within = vec![
            Transaction::with_id("f", date(2024, 4, 1), "One", 1.0),
            Transaction::with_id("f", date(2024, 4, 2), "Two", 2.0),
        ];
        assert!(ledger.with_transactions(dup_within).is_err());
    }

    #[test]
    fn test_remove_single() {
        let ledger = sample();
        let next = ledger.without("a").unwrap();
        assert_eq!(next.len(), 3);
        assert!(!next.contains("a"));
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn test_remove_whole_group() {
        let ledger = sample();
        assert_eq!(ledger.removal_targets("c").unwrap(), vec!["b", "c"]);

        let next = ledger.without("c").unwrap();
        assert_eq!(next.len(), 2);
        assert!(next.group("rent").is_empty());
        assert!(next.contains("a"));
        assert!(next.contains("d"));
    }

    #[test]
    fn test_remove_unknown_id() {
        assert!(matches!(
            sample().without("nope"),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn test_sorted_newest_first() {
        let ledger = sample();
        let ids: Vec<_> = ledger.sorted_newest_first().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn test_json_round_trip() {
        let ledger = sample();
        let json = ledger.to_json().unwrap();
        assert!(json.trim_start().starts_with('['));
        let back = Ledger::from_json(&json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn test_json_amounts_round_trip_exactly() {
        let amounts = [9108380.865892159, -0.1 - 0.2, 1e-7, -123456.78901234567];
        let txns = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| Transaction::with_id(i.to_string(), date(2024, 1, 5), "x", *a))
            .collect();
        let ledger = Ledger::from_transactions(txns).unwrap();
        let back = Ledger::from_json(&ledger.to_json().unwrap()).unwrap();
        let got: Vec<f64> = back.iter().map(|t| t.amount).collect();
        for (a, b) in amounts.iter().zip(&got) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_json_with_duplicates_is_rejected() {
        let json = r#"[
            {"id":"x","date":"2024-01-01","description":"A","amount":1.0},
            {"id":"x","date":"2024-01-02","description":"B","amount":2.0}
        ]"#;
        assert!(Ledger::from_json(json).is_err());
    }
}
