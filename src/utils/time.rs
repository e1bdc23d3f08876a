//! Time utilities: parsing HH:MM, epoch conversions, duration formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Current local wall-clock time, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Seconds since epoch of a naive local timestamp (no timezone conversion).
pub fn to_epoch(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp()
}

pub fn from_epoch(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

/// `HH:MM:SS`, negative values are shown as zero.
pub fn format_hms(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// `HH:MM`, negative values are shown as zero.
pub fn format_hm(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}", s / 3600, (s % 3600) / 60)
}
