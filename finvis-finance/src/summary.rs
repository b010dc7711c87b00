//! Scalar summaries for the summary cards.
//!
//! Averages are per active period: per-month (per-year) sums divided by the
//! number of distinct months (years) that have transactions, not by the number
//! of transactions.

use std::fmt;
use std::str::FromStr;

use finvis_core::Transaction;
use serde::{Deserialize, Serialize};

use crate::buckets::{by_month, by_year, Bucket};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_expenses: f64,
    pub total_income: f64,
    pub net_income: f64,
    pub avg_monthly_expenses: f64,
    pub avg_monthly_income: f64,
    pub avg_monthly_net: f64,
    pub avg_yearly_expenses: f64,
    pub avg_yearly_income: f64,
    pub avg_yearly_net: f64,
}

/// Which figures a summary card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SummationMode {
    #[default]
    #[serde(rename = "total")]
    Total,
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "yearly")]
    Yearly,
}

impl fmt::Display for SummationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SummationMode::Total => "total",
            SummationMode::Monthly => "monthly",
            SummationMode::Yearly => "yearly",
        })
    }
}

impl FromStr for SummationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "total" => Ok(SummationMode::Total),
            "monthly" => Ok(SummationMode::Monthly),
            "yearly" => Ok(SummationMode::Yearly),
            other => Err(format!("unknown summation mode '{other}'")),
        }
    }
}

/// The three figures on a summary card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Card {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

impl Summary {
    pub fn card(&self, mode: SummationMode) -> Card {
        match mode {
            SummationMode::Total => Card {
                income: self.total_income,
                expenses: self.total_expenses,
                net: self.net_income,
            },
            SummationMode::Monthly => Card {
                income: self.avg_monthly_income,
                expenses: self.avg_monthly_expenses,
                net: self.avg_monthly_net,
            },
            SummationMode::Yearly => Card {
                income: self.avg_yearly_income,
                expenses: self.avg_yearly_expenses,
                net: self.avg_yearly_net,
            },
        }
    }
}

/// Mean income and expenses across groups; zero when there are none.
fn average<'a>(groups: impl ExactSizeIterator<Item = &'a Bucket>) -> Bucket {
    let n = groups.len();
    if n == 0 {
        return Bucket::default();
    }
    let total = groups.fold(Bucket::default(), |acc, b| Bucket {
        income: acc.income + b.income,
        expenses: acc.expenses + b.expenses,
    });
    Bucket {
        income: total.income / n as f64,
        expenses: total.expenses / n as f64,
    }
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut totals = Bucket::default();
    for txn in transactions {
        totals.add(txn.amount);
    }

    let monthly = average(by_month(transactions).values());
    let yearly = average(by_year(transactions).values());

    Summary {
        total_expenses: totals.expenses,
        total_income: totals.income,
        net_income: totals.net(),
        avg_monthly_expenses: monthly.expenses,
        avg_monthly_income: monthly.income,
        avg_monthly_net: monthly.net(),
        avg_yearly_expenses: yearly.expenses,
        avg_yearly_income: yearly.income,
        avg_yearly_net: yearly.net(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(y: i32, m: u32, d: u32, amount: f64) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), "t", amount)
    }

    #[test]
    fn test_empty_ledger_is_all_zero() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn test_totals_partition_by_sign() {
        let txns = vec![txn(2024, 1, 1, 1000.0), txn(2024, 1, 2, -250.0), txn(2024, 1, 3, -50.0)];
        let s = summarize(&txns);
        assert_eq!(s.total_income, 1000.0);
        assert_eq!(s.total_expenses, 300.0);
        assert_eq!(s.net_income, s.total_income - s.total_expenses);
    }

    #[test]
    fn test_monthly_average_over_active_months() {
        // 100 in January, 200 in March; February has nothing and is not counted
        let txns = vec![
            txn(2024, 1, 5, -60.0),
            txn(2024, 1, 25, -40.0),
            txn(2024, 3, 10, -200.0),
        ];
        let s = summarize(&txns);
        assert_eq!(s.avg_monthly_expenses, 150.0);
        assert_eq!(s.avg_monthly_income, 0.0);
        assert_eq!(s.avg_monthly_net, -150.0);
    }

    #[test]
    fn test_yearly_average() {
        let txns = vec![
            txn(2023, 6, 1, 3000.0),
            txn(2024, 1, 1, 1000.0),
            txn(2024, 2, 1, 1000.0),
            txn(2024, 2, 2, -500.0),
        ];
        let s = summarize(&txns);
        assert_eq!(s.avg_yearly_income, 2500.0);
        assert_eq!(s.avg_yearly_expenses, 250.0);
        assert_eq!(s.avg_yearly_net, 2250.0);
        // three active months
        assert_eq!(s.avg_monthly_income, 5000.0 / 3.0);
    }

    #[test]
    fn test_cards() {
        let s = summarize(&[txn(2024, 1, 1, 100.0), txn(2024, 2, 1, -50.0)]);
        assert_eq!(s.card(SummationMode::Total), Card { income: 100.0, expenses: 50.0, net: 50.0 });
        assert_eq!(s.card(SummationMode::Monthly).income, 50.0);
        assert_eq!(s.card(SummationMode::Yearly).expenses, 50.0);
        assert_eq!("Monthly".parse::<SummationMode>(), Ok(SummationMode::Monthly));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(summarize(&[txn(2024, 1, 1, 10.0)])).unwrap();
        for key in [
            "totalExpenses",
            "totalIncome",
            "netIncome",
            "avgMonthlyExpenses",
            "avgMonthlyIncome",
            "avgMonthlyNet",
            "avgYearlyExpenses",
            "avgYearlyIncome",
            "avgYearlyNet",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
