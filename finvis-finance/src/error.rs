use finvis_core::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("periods must be a positive integer, got {0}")]
    InvalidPeriods(u32),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("amount must be a non-zero number, got {0}")]
    InvalidAmount(f64),
    #[error("schedule runs past the supported date range")]
    DateOutOfRange,
    #[error("chart layout needs 0 < day_span < month_range, got {day_span} and {month_range}")]
    InvalidLayout { month_range: u32, day_span: u32 },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
