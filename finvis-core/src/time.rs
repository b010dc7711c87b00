//! Time utilities: "today" as a naive calendar date in the user's timezone.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Resolve an IANA timezone name like "America/Chicago".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// The local calendar date in `tz` at instant `now`.
pub fn local_date_at(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz = parse_timezone(tz)?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Today's calendar date in `tz`.
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    local_date_at(Utc::now(), tz)
}
