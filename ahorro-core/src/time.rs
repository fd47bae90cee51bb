//! Time utilities: the local calendar date in a configured IANA timezone.

use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::promotion::Weekday;

pub const DEFAULT_TIMEZONE: &str = "America/Argentina/Buenos_Aires";

fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Calendar date of `now` in `tz`.
pub fn local_date(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz = parse_tz(tz)?;
    Ok(now.with_timezone(&tz).date_naive())
}

pub fn today(tz: &str) -> Result<NaiveDate> {
    local_date(Utc::now(), tz)
}

pub fn today_weekday(tz: &str) -> Result<Weekday> {
    Ok(today(tz)?.weekday().into())
}
