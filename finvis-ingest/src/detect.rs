//! Delimiter and header-row heuristics.
//!
//! Neither is a CSV grammar: a quoted field containing the delimiter is still
//! split, and a data row that happens to contain a keyword is taken for a
//! header.

/// Field separator of a statement export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Comma if the line has one, otherwise tab.
pub fn detect_delimiter(line: &str) -> Delimiter {
    if line.contains(',') {
        Delimiter::Comma
    } else {
        Delimiter::Tab
    }
}

/// Keywords that mark a header row. Substring matching means "debit" also
/// catches "Debits" and "transaction" catches "Transaction Date".
pub const DEFAULT_HEADER_KEYWORDS: [&str; 8] = [
    "date",
    "description",
    "withdrawal",
    "debit",
    "credit",
    "deposit",
    "balance",
    "transaction",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderKeywords {
    keywords: Vec<String>,
}

impl Default for HeaderKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_KEYWORDS)
    }
}

impl HeaderKeywords {
    /// Keywords are matched case-insensitively; empty entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_header_line(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

/// Header check against the default keyword set.
pub fn is_header_line(line: &str) -> bool {
    HeaderKeywords::default().is_header_line(line)
}
