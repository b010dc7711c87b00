use finvis_core::Transaction;

use crate::detect::Delimiter;

/// Why a row was dropped during ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Date or description empty after cleanup
    MissingField,
    /// Date cell matched no known format
    InvalidDate(String),
    /// Amount resolved to zero or NaN
    ZeroAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based position among non-blank lines
    pub row: usize,
    pub reason: SkipReason,
}

/// Normalized output of a statement parse plus what was dropped along the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRow>,
    /// Rows whose date matched a day/month-ambiguous format
    pub ambiguous_dates: usize,
    pub header_skipped: bool,
    pub delimiter: Option<Delimiter>,
}

impl ParseReport {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
