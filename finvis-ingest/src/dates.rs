//! Date normalization for statement exports.
//!
//! Two stages:
//! 1. strict match against an ordered list of formats; the first format that
//!    parses *and* re-formats to exactly the input wins. Order is the tie-break
//!    between readings like `MM/DD/YYYY` and `DD/MM/YYYY`.
//! 2. permissive fallback (unpadded numbers, ISO date-times, RFC 2822, month
//!    names).
//!
//! Day-first vs month-first is not resolved here. A strict match whose swapped
//! reading is also a valid, different date is returned with `ambiguous = true`
//! so callers can surface it; the fixed order still decides.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Which field leads a format; used to detect day/month ambiguity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
    YearFirst,
    MonthFirst,
    DayFirst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    /// Token form, e.g. `MM/DD/YYYY`
    pub name: String,
    /// chrono strftime pattern
    pub pattern: String,
    pub order: FieldOrder,
}

impl DateFormat {
    /// Build a format from token notation (`YYYY`, `YY`, `MM`, `DD`, any
    /// separators). Returns `None` unless year, month and day all appear.
    pub fn from_tokens(tokens: &str) -> Option<Self> {
        let mut pattern = String::new();
        let mut first: Option<FieldOrder> = None;
        let (mut has_y, mut has_m, mut has_d) = (false, false, false);
        let mut rest = tokens.trim();
        if rest.is_empty() {
            return None;
        }

        while !rest.is_empty() {
            let (strftime, field, len) = if rest.starts_with("YYYY") {
                ("%Y", FieldOrder::YearFirst, 4)
            } else if rest.starts_with("YY") {
                ("%y", FieldOrder::YearFirst, 2)
            } else if rest.starts_with("MM") {
                ("%m", FieldOrder::MonthFirst, 2)
            } else if rest.starts_with("DD") {
                ("%d", FieldOrder::DayFirst, 2)
            } else {
                let c = rest.chars().next()?;
                if c.is_ascii_alphanumeric() || c == '%' {
                    return None;
                }
                pattern.push(c);
                rest = &rest[c.len_utf8()..];
                continue;
            };

            match field {
                FieldOrder::YearFirst => has_y = true,
                FieldOrder::MonthFirst => has_m = true,
                FieldOrder::DayFirst => has_d = true,
            }
            first.get_or_insert(field);
            pattern.push_str(strftime);
            rest = &rest[len..];
        }

        if !(has_y && has_m && has_d) {
            return None;
        }
        Some(Self {
            name: tokens.trim().to_string(),
            pattern,
            order: first?,
        })
    }

    /// Parse only if re-formatting gives back the exact input.
    fn parse_strict(&self, raw: &str) -> Option<NaiveDate> {
        let date = NaiveDate::parse_from_str(raw, &self.pattern).ok()?;
        (date.format(&self.pattern).to_string() == raw).then_some(date)
    }
}

/// Built-in priority list, checked in this order.
pub const DEFAULT_DATE_FORMATS: [&str; 8] = [
    "YYYY-MM-DD",
    "MM/DD/YYYY",
    "DD-MM-YYYY",
    "YYYY/MM/DD",
    "MM-DD-YYYY",
    "DD/MM/YYYY",
    "YYMMDD",
    "YYYYMMDD",
];

/// Lenient date-only patterns for the fallback stage (no round-trip check).
/// `%Y` also accepts one or two digits, so those matches are rejected by
/// [`MIN_PERMISSIVE_YEAR`] and the `%y` patterns pick up two-digit years.
const PERMISSIVE_DATE_PATTERNS: [&str; 14] = [
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m-%d-%y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%a %b %d %Y",
    "%a, %b %d, %Y",
];

const PERMISSIVE_DATETIME_PATTERNS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Outcome of a successful normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub date: NaiveDate,
    /// Name of the strict format that matched; `None` for the fallback stage
    pub format: Option<String>,
    pub ambiguous: bool,
}

impl DateMatch {
    /// Canonical `YYYY-MM-DD`
    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Ordered list of strict formats plus the permissive fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormats {
    formats: Vec<DateFormat>,
}

impl Default for DateFormats {
    fn default() -> Self {
        let formats = DEFAULT_DATE_FORMATS
            .iter()
            .filter_map(|f| DateFormat::from_tokens(f))
            .collect();
        Self { formats }
    }
}

impl DateFormats {
    pub fn new(formats: Vec<DateFormat>) -> Self {
        Self { formats }
    }

    /// Build from token names (`DD/MM/YYYY`, ...). Unknown names are reported
    /// back so callers can complain about the bad entry.
    pub fn from_names<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut formats = Vec::new();
        for name in names {
            let name = name.as_ref();
            let fmt = DateFormat::from_tokens(name).ok_or_else(|| name.to_string())?;
            formats.push(fmt);
        }
        Ok(Self { formats })
    }

    pub fn formats(&self) -> &[DateFormat] {
        &self.formats
    }

    pub fn normalize(&self, raw: &str) -> Option<DateMatch> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        for fmt in &self.formats {
            if let Some(date) = fmt.parse_strict(raw) {
                let ambiguous = is_ambiguous(date, fmt.order);
                if ambiguous {
                    tracing::debug!(raw, format = %fmt.name, "ambiguous day/month order");
                }
                return Some(DateMatch {
                    date,
                    format: Some(fmt.name.clone()),
                    ambiguous,
                });
            }
        }

        parse_permissive(raw).map(|date| DateMatch {
            date,
            format: None,
            ambiguous: false,
        })
    }
}

/// Normalize with the default formats, returning `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> Option<String> {
    DateFormats::default().normalize(raw).map(|m| m.iso())
}

fn is_ambiguous(date: NaiveDate, order: FieldOrder) -> bool {
    match order {
        FieldOrder::YearFirst => false,
        FieldOrder::MonthFirst | FieldOrder::DayFirst => {
            NaiveDate::from_ymd_opt(date.year(), date.day(), date.month())
                .is_some_and(|swapped| swapped != date)
        }
    }
}

/// Years below this come from a short year field read through `%Y`.
const MIN_PERMISSIVE_YEAR: i32 = 1000;

fn parse_permissive(raw: &str) -> Option<NaiveDate> {
    let plausible = |d: &NaiveDate| d.year() >= MIN_PERMISSIVE_YEAR;

    let date_only = PERMISSIVE_DATE_PATTERNS
        .iter()
        .filter_map(|pattern| NaiveDate::parse_from_str(raw, pattern).ok())
        .find(plausible);
    if date_only.is_some() {
        return date_only;
    }

    PERMISSIVE_DATETIME_PATTERNS
        .iter()
        .filter_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .map(|dt| dt.date())
        .chain(DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .chain(DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.date_naive()))
        .find(plausible)
}
