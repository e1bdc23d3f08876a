//! Dense `(year, month)` bucket key: `year * 100 + month`.

use crate::errors::{AppError, AppResult};
use crate::utils::time::to_epoch;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey(i32);

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        MonthKey(date.year() * 100 + date.month() as i32)
    }

    pub fn of_datetime(dt: NaiveDateTime) -> Self {
        Self::of(dt.date())
    }

    /// Build a key from its parts, rejecting months outside `1..=12`.
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::of)
            .ok_or_else(|| AppError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.div_euclid(100)
    }

    pub fn month(self) -> u32 {
        self.0.rem_euclid(100) as u32
    }

    pub fn first_day(self) -> NaiveDate {
        // Keys are only built from valid dates.
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1).unwrap_or_default()
    }

    pub fn last_day(self) -> NaiveDate {
        let first = self.first_day();
        let next = if self.month() == 12 {
            NaiveDate::from_ymd_opt(self.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year(), self.month() + 1, 1)
        };
        next.and_then(|d| d.pred_opt()).unwrap_or(first)
    }

    /// Inclusive epoch bounds: first day 00:00:00 .. last day 23:59:59.
    pub fn bounds(self) -> (i64, i64) {
        let lo = self.first_day().and_time(NaiveTime::MIN);
        let hi = self
            .last_day()
            .and_hms_opt(23, 59, 59)
            .unwrap_or(lo);
        (to_epoch(lo), to_epoch(hi))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
