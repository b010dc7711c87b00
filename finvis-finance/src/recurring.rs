//! Recurring schedules: expand one template into dated instances that share a
//! recurring group id.
//!
//! Each instance advances one period from the previous instance. Monthly steps
//! clamp to the end of shorter months and keep the clamped day afterwards, so a
//! series starting Jan 31 runs Jan 31, Feb 29, Mar 29, Apr 29.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use finvis_core::{new_id, Transaction};
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "bi-weekly")]
    BiWeekly,
    #[serde(rename = "monthly")]
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::Monthly => "monthly",
        }
    }

    /// Unit name used in schedule labels ("3 bi-weeks")
    fn unit(&self) -> &'static str {
        match self {
            Frequency::Weekly => "week",
            Frequency::BiWeekly => "bi-week",
            Frequency::Monthly => "month",
        }
    }

    /// One period after `date`. Monthly steps clamp to the end of shorter months.
    pub fn next_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::BiWeekly => date.checked_add_days(Days::new(14)),
            Frequency::Monthly => date.checked_add_months(Months::new(1)),
        }
    }

    /// Date of the `n`-th occurrence counting from `start` (n = 0 is `start`),
    /// reached by `n` successive single steps.
    pub fn step(&self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        (0..n).try_fold(start, |date, _| self.next_after(date))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "bi-weekly" | "biweekly" => Ok(Frequency::BiWeekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(format!(
                "unknown frequency '{other}' (expected weekly, bi-weekly or monthly)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringConfig {
    pub frequency: Frequency,
    pub periods: u32,
}

impl RecurringConfig {
    pub fn new(frequency: Frequency, periods: u32) -> Self {
        Self { frequency, periods }
    }
}

/// The user-entered transaction a schedule is generated from
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringTemplate {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Option<String>,
    pub currency: Option<String>,
}

impl RecurringTemplate {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category: None,
            currency: None,
        }
    }
}

/// Generate `config.periods` instances of `template`.
///
/// Everything is validated before the first instance is built, so an invalid
/// request produces an error and no transactions.
pub fn expand(
    template: &RecurringTemplate,
    config: &RecurringConfig,
) -> Result<Vec<Transaction>, FinanceError> {
    if config.periods == 0 {
        return Err(FinanceError::InvalidPeriods(config.periods));
    }
    let description = template.description.trim();
    if description.is_empty() {
        return Err(FinanceError::MissingField("description"));
    }
    if !template.amount.is_finite() || template.amount == 0.0 {
        return Err(FinanceError::InvalidAmount(template.amount));
    }

    let mut dates = Vec::with_capacity(config.periods as usize);
    let mut current = template.date;
    dates.push(current);
    for _ in 1..config.periods {
        current = config
            .frequency
            .next_after(current)
            .ok_or(FinanceError::DateOutOfRange)?;
        dates.push(current);
    }

    let group_id = new_id();
    tracing::debug!(
        group = %group_id,
        frequency = %config.frequency,
        periods = config.periods,
        "expanding recurring schedule"
    );

    Ok(dates
        .into_iter()
        .map(|date| {
            let mut txn = Transaction::new(date, description, template.amount)
                .with_group(group_id.clone());
            txn.category = template.category.clone();
            txn.currency = template.currency.clone();
            txn
        })
        .collect())
}

/// Human label for a schedule, e.g. "1 week", "6 months".
pub fn describe_schedule(config: &RecurringConfig) -> String {
    let suffix = if config.periods == 1 { "" } else { "s" };
    format!("{} {}{}", config.periods, config.frequency.unit(), suffix)
}

/// How many occurrences starting at `start` fall on or before `until`.
pub fn periods_until(start: NaiveDate, frequency: Frequency, until: NaiveDate) -> u32 {
    let mut n = 0;
    let mut current = Some(start);
    while let Some(date) = current.filter(|d| *d <= until) {
        n += 1;
        current = frequency.next_after(date);
    }
    n
}
