//! finvis-finance: recurring schedules, period buckets, summary cards and the cumulative chart series

pub mod buckets;
pub mod chart;
pub mod demo;
pub mod error;
pub mod recurring;
pub mod summary;

pub use buckets::{Bucket, MonthKey, by_day, by_month, by_year};
pub use chart::{ChartDataPoint, ChartLayout, ChartSeries, Tick, build_chart, build_chart_with};
pub use demo::{demo_ledger, demo_transactions};
pub use error::FinanceError;
pub use recurring::{
    Frequency, RecurringConfig, RecurringTemplate, describe_schedule, expand, periods_until,
};
pub use summary::{Card, SummationMode, Summary, summarize};
