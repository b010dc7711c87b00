pub mod bank_csv;

pub use bank_csv::{parse_csv, CsvParser};
