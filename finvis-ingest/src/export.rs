//! Write transactions back out in the statement shape the parser reads.
//!
//! Output is tab separated (`Date, Description, Debit, Credit`) because the
//! importer splits without honoring quotes; a comma inside a description would
//! otherwise shift the columns on re-import. Quote characters are dropped by the
//! importer's cell cleanup, so they do not survive a round trip.

use std::io::Write;

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use finvis_core::Transaction;

pub fn write_statement<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    wtr.write_record(["Date", "Description", "Debit", "Credit"])
        .context("writing header")?;

    for txn in transactions {
        let description = flatten(&txn.description);
        let amount = txn.abs_amount().to_string();
        let (debit, credit) = if txn.is_expense() {
            (amount.as_str(), "")
        } else {
            ("", amount.as_str())
        };
        wtr.write_record([txn.iso_date().as_str(), description.as_str(), debit, credit])
            .with_context(|| format!("writing transaction {}", txn.id))?;
    }

    wtr.flush().context("flushing statement")?;
    Ok(())
}

/// Tabs and line breaks would split the row; fold them into spaces.
fn flatten(s: &str) -> String {
    s.chars()
        .map(|c| if matches!(c, '\t' | '\r' | '\n') { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_csv;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_export_shape() {
        let txns = vec![
            Transaction::new(date(2024, 1, 15), "Coffee Shop", -4.5),
            Transaction::new(date(2024, 1, 31), "Paycheck", 2000.0),
        ];
        let mut buf = Vec::new();
        write_statement(&txns, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Date\tDescription\tDebit\tCredit");
        assert_eq!(lines[1], "2024-01-15\tCoffee Shop\t4.5\t");
        assert_eq!(lines[2], "2024-01-31\tPaycheck\t\t2000");
    }

    #[test]
    fn test_reimport_preserves_rows() {
        let txns = vec![
            Transaction::new(date(2024, 1, 15), "Smith, J. — invoice 12", -1234.56),
            Transaction::new(date(2024, 2, 1), "Interest\tpaid", 0.07),
        ];
        let mut buf = Vec::new();
        write_statement(&txns, &mut buf).unwrap();
        let back = parse_csv(&String::from_utf8(buf).unwrap());

        assert_eq!(back.len(), 2);
        assert_eq!(back[0].date, txns[0].date);
        assert_eq!(back[0].description, "Smith, J. — invoice 12");
        assert_eq!(back[0].amount, -1234.56);
        assert_eq!(back[1].description, "Interest paid");
        assert_eq!(back[1].amount, 0.07);
    }
}
