//! Debit/credit amount resolution.

use std::sync::LazyLock;

use regex::Regex;

/// Currency symbols, thousands separators and whitespace are dropped before parsing.
static NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$€£¥,\s]").expect("noise pattern"));

/// Leading decimal number; trailing junk is ignored.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("number pattern")
});

/// Parse a money cell like `$1,234.50`. `None` when no number leads the cell.
pub fn parse_amount(cell: &str) -> Option<f64> {
    let cleaned = NOISE_RE.replace_all(cell, "");
    let number = NUMBER_RE.find(&cleaned)?;
    number.as_str().parse::<f64>().ok()
}

/// Signed amount from the debit/credit pair: a numeric debit wins and becomes
/// `-|debit|`; otherwise a numeric credit becomes `+|credit|`; otherwise 0.
pub fn resolve_amount(debit: &str, credit: &str) -> f64 {
    if !debit.is_empty() {
        if let Some(v) = parse_amount(debit) {
            return -v.abs();
        }
    }
    if !credit.is_empty() {
        if let Some(v) = parse_amount(credit) {
            return v.abs();
        }
    }
    0.0
}
