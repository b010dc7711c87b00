//! Cumulative income/expense series for the monthly overview chart.
//!
//! Layout: every month present in the ledger gets the same width on the x axis
//! (`month_range` units) regardless of how many days it has. Days are placed
//! proportionally inside the first `day_span` units; the month-end marker sits
//! on the last unit of the month. Months with no transactions are not drawn.
//!
//! Running totals never reset: each point carries the cumulative income and
//! expenses from the start of the ledger up to its date. Dates after `today`
//! are left out.

use chrono::{Datelike, NaiveDate};
use finvis_core::Transaction;
use serde::Serialize;

use crate::buckets::{by_day, by_month, MonthKey};
use crate::error::FinanceError;

/// Width of each month on the x axis. Build with [`ChartLayout::new`] so the
/// day points always land before the month-end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    month_range: u32,
    /// Units of each month used for day points; the rest is a gap before the marker
    day_span: u32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            month_range: 100,
            day_span: 90,
        }
    }
}

impl ChartLayout {
    /// Requires `0 < day_span < month_range`.
    pub fn new(month_range: u32, day_span: u32) -> Result<Self, FinanceError> {
        if day_span == 0 || day_span >= month_range {
            return Err(FinanceError::InvalidLayout {
                month_range,
                day_span,
            });
        }
        Ok(Self {
            month_range,
            day_span,
        })
    }

    pub fn month_range(&self) -> u32 {
        self.month_range
    }

    pub fn day_span(&self) -> u32 {
        self.day_span
    }

    fn month_start(&self, month_index: usize) -> u32 {
        month_index as u32 * self.month_range
    }

    fn day_index(&self, month_index: usize, day: u32, days_in_month: u32) -> u32 {
        self.month_start(month_index) + (day - 1) * self.day_span / days_in_month
    }

    fn month_total_index(&self, month_index: usize) -> u32 {
        self.month_start(month_index) + self.month_range - 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    /// Synthetic x position
    pub index: u32,
    pub date: NaiveDate,
    pub label: String,
    pub month_name: String,
    pub month_index: usize,
    pub is_month_total: bool,
    pub income: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tick {
    pub value: u32,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub points: Vec<ChartDataPoint>,
    pub ticks: Vec<Tick>,
    pub num_months: usize,
    /// x axis range, `(0, num_months * month_range)`
    pub domain: (u32, u32),
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date behind the point at `position`, for drill-down from a selected point.
    pub fn date_at(&self, position: usize) -> Option<NaiveDate> {
        self.points.get(position).map(|p| p.date)
    }

    /// Every point dated `date`: the day point, plus the month-end marker when
    /// `date` is the last day of its month.
    pub fn points_on(&self, date: NaiveDate) -> Vec<&ChartDataPoint> {
        self.points.iter().filter(|p| p.date == date).collect()
    }

    pub fn last(&self) -> Option<&ChartDataPoint> {
        self.points.last()
    }
}

pub fn build_chart(transactions: &[Transaction], today: NaiveDate) -> ChartSeries {
    build_chart_with(transactions, today, ChartLayout::default())
}

pub fn build_chart_with(
    transactions: &[Transaction],
    today: NaiveDate,
    layout: ChartLayout,
) -> ChartSeries {
    let months: Vec<MonthKey> = by_month(transactions).into_keys().collect();
    if months.is_empty() {
        return ChartSeries::default();
    }

    let days = by_day(transactions);
    let mut points = Vec::new();
    let mut ticks = Vec::with_capacity(months.len());
    let mut running_income = 0.0;
    let mut running_expenses = 0.0;

    for (month_index, month) in months.iter().enumerate() {
        let name = month.abbreviation();
        let days_in_month = month.days_in_month();
        ticks.push(Tick {
            value: layout.month_start(month_index),
            label: name.to_string(),
        });

        let mut active = false;
        for (date, bucket) in days.range(month.first_day()..=month.last_day()) {
            if *date > today {
                break;
            }
            if !bucket.has_activity() {
                continue;
            }
            running_income += bucket.income;
            running_expenses += bucket.expenses;
            active = true;

            points.push(ChartDataPoint {
                index: layout.day_index(month_index, date.day(), days_in_month),
                date: *date,
                label: format!("{} {}", name, date.day()),
                month_name: name.to_string(),
                month_index,
                is_month_total: false,
                income: running_income,
                expenses: running_expenses,
            });
        }

        let last_day = month.last_day();
        if active && last_day <= today {
            points.push(ChartDataPoint {
                index: layout.month_total_index(month_index),
                date: last_day,
                label: format!("{name} Total"),
                month_name: name.to_string(),
                month_index,
                is_month_total: true,
                income: running_income,
                expenses: running_expenses,
            });
        }
    }

    ChartSeries {
        points,
        ticks,
        num_months: months.len(),
        domain: (0, months.len() as u32 * layout.month_range),
    }
}
