//! Raw recorded intervals, in memory and as stored rows.

use crate::utils::time::to_epoch;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// In-memory handle of a [`TimeEntry`], assigned by the repository.
///
/// Stable for the whole lifetime of the entry (it survives edits, saves and
/// moves between months) and never reused after the entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A recorded work interval.
///
/// `end` may be earlier than `start`: a running timer keeps `end == start`
/// until it is stopped, and hand-edited rows can cross midnight without a
/// date change. Neither is an error here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeEntry {
    pub id: EntryId,
    pub record_id: i64, // ⇔ time_table.id (0 = not persisted yet)
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub comment: String,
}

impl TimeEntry {
    pub fn new(
        id: EntryId,
        record_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id,
            record_id,
            start,
            end,
            comment: comment.into(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.record_id != 0
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// `end - start` in seconds, never negative.
    pub fn work_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds().max(0)
    }

    pub fn to_record(&self) -> TimeRecord {
        TimeRecord {
            id: self.record_id,
            start: to_epoch(self.start),
            end: to_epoch(self.end),
            comment: self.comment.clone(),
        }
    }
}

/// One row of `time_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRecord {
    pub id: i64,
    pub start: i64, // seconds since epoch, naive local time
    pub end: i64,
    pub comment: String,
}
