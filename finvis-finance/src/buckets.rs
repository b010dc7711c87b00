//! Time-keyed income/expense accumulators (day, month, year).

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use finvis_core::Transaction;
use serde::Serialize;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Income and expense totals for one period. Expenses are stored as a
/// positive magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bucket {
    pub income: f64,
    pub expenses: f64,
}

impl Bucket {
    pub fn add(&mut self, amount: f64) {
        if amount > 0.0 {
            self.income += amount;
        } else if amount < 0.0 {
            self.expenses += amount.abs();
        }
    }

    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }

    pub fn has_activity(&self) -> bool {
        self.income > 0.0 || self.expenses > 0.0
    }
}

/// Calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month as usize).saturating_sub(1) % 12]
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn bucket_by<K: Ord>(
    transactions: &[Transaction],
    key: impl Fn(&Transaction) -> K,
) -> BTreeMap<K, Bucket> {
    let mut out: BTreeMap<K, Bucket> = BTreeMap::new();
    for txn in transactions {
        out.entry(key(txn)).or_default().add(txn.amount);
    }
    out
}

pub fn by_day(transactions: &[Transaction]) -> BTreeMap<NaiveDate, Bucket> {
    bucket_by(transactions, |t| t.date)
}

pub fn by_month(transactions: &[Transaction]) -> BTreeMap<MonthKey, Bucket> {
    bucket_by(transactions, |t| MonthKey::of(t.date))
}

pub fn by_year(transactions: &[Transaction]) -> BTreeMap<i32, Bucket> {
    bucket_by(transactions, |t| t.date.year())
}
