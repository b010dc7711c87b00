//! finvis-ingest: statement ingestion (bank CSV exports) into normalized transactions.

pub mod amount;
pub mod dates;
pub mod detect;
pub mod export;
pub mod parsers;
pub mod sanitize;
pub mod types;

pub use dates::{normalize_date, DateFormat, DateFormats, DateMatch};
pub use detect::{detect_delimiter, is_header_line, Delimiter, HeaderKeywords};
pub use export::write_statement;
pub use parsers::{parse_csv, CsvParser};
pub use sanitize::clean_cell;
pub use types::{ParseReport, SkipReason, SkippedRow};
