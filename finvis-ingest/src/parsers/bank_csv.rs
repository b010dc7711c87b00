//! Generic bank-statement CSV parser.
//!
//! Expected shape (comma or tab separated, header row optional):
//!   Date,Description,Debit,Credit[,Balance,...]
//!   2024-01-15,Coffee Shop,4.50,
//!   01/15/2024,Paycheck,,2000.00
//!
//! Ingestion is best-effort: a bad row is skipped and recorded in the report,
//! it never aborts the batch.

use std::path::Path;

use anyhow::{Context, Result};
use finvis_core::{Transaction, CSV_IMPORT_SOURCE};

use crate::amount::resolve_amount;
use crate::dates::DateFormats;
use crate::detect::{detect_delimiter, HeaderKeywords};
use crate::sanitize::clean_cell;
use crate::types::{ParseReport, SkipReason, SkippedRow};

#[derive(Debug, Clone)]
pub struct CsvParser {
    header_keywords: HeaderKeywords,
    date_formats: DateFormats,
    source: String,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            header_keywords: HeaderKeywords::default(),
            date_formats: DateFormats::default(),
            source: CSV_IMPORT_SOURCE.to_string(),
        }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header_keywords(mut self, keywords: HeaderKeywords) -> Self {
        self.header_keywords = keywords;
        self
    }

    pub fn with_date_formats(mut self, formats: DateFormats) -> Self {
        self.date_formats = formats;
        self
    }

    /// Provenance tag written to every emitted transaction
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn parse(&self, content: &str) -> Vec<Transaction> {
        self.parse_with_report(content).transactions
    }

    pub fn parse_with_report(&self, content: &str) -> ParseReport {
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        let mut report = ParseReport::default();

        let Some(first) = lines.first() else {
            return report;
        };

        let delimiter = detect_delimiter(first);
        report.delimiter = Some(delimiter);
        report.header_skipped = self.header_keywords.is_header_line(first);
        let start = usize::from(report.header_skipped);

        for (i, line) in lines.iter().enumerate().skip(start) {
            let row = i + 1;
            let columns: Vec<&str> = line.split(delimiter.as_char()).collect();
            let cell = |idx: usize| clean_cell(columns.get(idx).copied());

            let date_raw = cell(0);
            let description = cell(1);
            let debit = cell(2);
            let credit = cell(3);

            if date_raw.is_empty() || description.is_empty() {
                tracing::debug!(row, "skipping row with missing date or description");
                report.skipped.push(SkippedRow {
                    row,
                    reason: SkipReason::MissingField,
                });
                continue;
            }

            let Some(date) = self.date_formats.normalize(&date_raw) else {
                tracing::warn!(row, date = %date_raw, "invalid date ignored");
                report.skipped.push(SkippedRow {
                    row,
                    reason: SkipReason::InvalidDate(date_raw),
                });
                continue;
            };
            if date.ambiguous {
                report.ambiguous_dates += 1;
            }

            let amount = resolve_amount(&debit, &credit);
            if amount == 0.0 || amount.is_nan() {
                tracing::debug!(row, "skipping row without a usable amount");
                report.skipped.push(SkippedRow {
                    row,
                    reason: SkipReason::ZeroAmount,
                });
                continue;
            }

            report.transactions.push(
                Transaction::new(date.date, description, amount).with_source(self.source.clone()),
            );
        }

        report
    }

    /// Parse raw file bytes. Non-UTF-8 input is a structural failure.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseReport> {
        let text = std::str::from_utf8(bytes).context("statement is not UTF-8 text")?;
        Ok(self.parse_with_report(text))
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseReport> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let report = self
            .parse_bytes(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!(
            file = %path.display(),
            imported = report.transactions.len(),
            skipped = report.skipped.len(),
            "parsed statement"
        );
        Ok(report)
    }
}

/// Parse CSV text with the default configuration.
pub fn parse_csv(content: &str) -> Vec<Transaction> {
    CsvParser::default().parse(content)
}
