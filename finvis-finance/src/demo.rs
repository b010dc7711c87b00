//! Sample ledger for demo mode.
//!
//! Covers the three months before `today`'s month plus the current month up to
//! `today`. Amounts are fixed so the same `today` always yields the same dates
//! and totals; only ids differ between calls.

use chrono::{Datelike, Days, Months, NaiveDate};
use finvis_core::{Ledger, Transaction};

use crate::error::FinanceError;
use crate::recurring::{expand, periods_until, Frequency, RecurringConfig, RecurringTemplate};

pub const DEMO_SOURCE: &str = "demo";

struct Schedule {
    description: &'static str,
    amount: f64,
    category: &'static str,
    frequency: Frequency,
    /// Days after the first day of the demo period
    offset_days: u64,
}

const SCHEDULES: &[Schedule] = &[
    Schedule {
        description: "Paycheck - Acme Corp",
        amount: 2400.0,
        category: "Income",
        frequency: Frequency::BiWeekly,
        offset_days: 4,
    },
    Schedule {
        description: "Rent",
        amount: -1450.0,
        category: "Housing",
        frequency: Frequency::Monthly,
        offset_days: 0,
    },
    Schedule {
        description: "Grocery Mart",
        amount: -86.4,
        category: "Groceries",
        frequency: Frequency::Weekly,
        offset_days: 2,
    },
    Schedule {
        description: "City Power & Water",
        amount: -132.15,
        category: "Utilities",
        frequency: Frequency::Monthly,
        offset_days: 14,
    },
    Schedule {
        description: "StreamFlix Subscription",
        amount: -15.99,
        category: "Entertainment",
        frequency: Frequency::Monthly,
        offset_days: 19,
    },
];

// One-off purchases: (days after start, description, amount, category)
const ONE_OFFS: &[(u64, &str, f64, &str)] = &[
    (9, "Hardware Store", -64.3, "Home"),
    (23, "Dinner - Luigi's", -58.75, "Dining"),
    (38, "Tax Refund", 412.0, "Income"),
    (51, "Car Service", -289.0, "Transport"),
    (66, "Concert Tickets", -120.0, "Entertainment"),
    (80, "Pharmacy", -23.49, "Health"),
];

/// First day of the month three months before `today`'s month.
pub fn demo_start(today: NaiveDate) -> NaiveDate {
    let first = today.with_day(1).unwrap_or(today);
    first.checked_sub_months(Months::new(3)).unwrap_or(first)
}

pub fn demo_transactions(today: NaiveDate) -> Result<Vec<Transaction>, FinanceError> {
    let start = demo_start(today);
    let mut out = Vec::new();

    for schedule in SCHEDULES {
        let first = start
            .checked_add_days(Days::new(schedule.offset_days))
            .ok_or(FinanceError::DateOutOfRange)?;
        let periods = periods_until(first, schedule.frequency, today);
        if periods == 0 {
            continue;
        }
        let mut template = RecurringTemplate::new(first, schedule.description, schedule.amount);
        template.category = Some(schedule.category.to_string());
        template.currency = Some("USD".to_string());
        let config = RecurringConfig::new(schedule.frequency, periods);
        out.extend(
            expand(&template, &config)?
                .into_iter()
                .map(|t| t.with_source(DEMO_SOURCE)),
        );
    }

    for &(offset, description, amount, category) in ONE_OFFS {
        let Some(date) = start.checked_add_days(Days::new(offset)) else {
            continue;
        };
        if date > today {
            continue;
        }
        out.push(
            Transaction::new(date, description, amount)
                .with_category(category)
                .with_currency("USD")
                .with_source(DEMO_SOURCE),
        );
    }

    out.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(out)
}

pub fn demo_ledger(today: NaiveDate) -> Result<Ledger, FinanceError> {
    let transactions = demo_transactions(today)?;
    tracing::info!(count = transactions.len(), "generated demo ledger");
    Ok(Ledger::from_transactions(transactions)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_demo_period() {
        assert_eq!(demo_start(date(2024, 5, 17)), date(2024, 2, 1));
        assert_eq!(demo_start(date(2024, 2, 29)), date(2023, 11, 1));
    }

    #[test]
    fn test_demo_ledger_is_bounded_by_today() {
        let today = date(2024, 5, 17);
        let ledger = demo_ledger(today).unwrap();
        assert!(!ledger.is_empty());
        assert!(ledger.iter().all(|t| t.date >= date(2024, 2, 1) && t.date <= today));
        assert!(ledger.iter().all(|t| t.source.as_deref() == Some(DEMO_SOURCE)));
    }

    #[test]
    fn test_demo_recurring_groups() {
        let today = date(2024, 5, 17);
        let txns = demo_transactions(today).unwrap();
        let rent: Vec<_> = txns.iter().filter(|t| t.description == "Rent").collect();
        // Feb, Mar, Apr, May
        assert_eq!(rent.len(), 4);
        assert!(rent.iter().all(|t| t.date.day() == 1));
        assert!(rent.iter().all(|t| t.recurring_group_id == rent[0].recurring_group_id));

        let one_off = txns.iter().find(|t| t.description == "Tax Refund").unwrap();
        assert!(one_off.recurring_group_id.is_none());
    }

    #[test]
    fn test_demo_deterministic_apart_from_ids() {
        let today = date(2024, 5, 17);
        let strip = |txns: Vec<Transaction>| {
            txns.into_iter()
                .map(|t| (t.date, t.description, t.amount))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            strip(demo_transactions(today).unwrap()),
            strip(demo_transactions(today).unwrap())
        );
    }
}
