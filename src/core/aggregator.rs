//! Month aggregation: overlap detection, per-day totals and the
//! presentation rows of one month.
//!
//! [`aggregate`] is a pure, total function of a month's entries. It never
//! fails: negative durations are clamped to zero and reported through
//! [`SerializedRow::is_time_bad`], overlaps through [`SerializedRow::is_overlap`].
//! Every call rebuilds the whole [`MonthView`]; nothing is patched
//! incrementally and nothing is carried over between calls.

use crate::models::time_entry::{EntryId, TimeEntry};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One presentation-ready line of the monthly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializedRow {
    /// Back reference to the entry this row was built from. Only meaningful
    /// until the next repository mutation.
    pub entry: EntryId,
    /// Set on the first row of a new date only; `None` means "same date as
    /// the row above".
    pub date: Option<NaiveDate>,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub work_seconds: i64,
    /// The day's total, carried by exactly one row of the day.
    pub day_total_seconds: i64,
    pub comment: String,
    pub is_white: bool,
    pub is_time_bad: bool,
    pub is_overlap: bool,
}

/// Derived state of one month.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    /// day of month → rows, in entry order.
    pub serialized_by_day: BTreeMap<u32, Vec<SerializedRow>>,
    /// day of month → worked seconds (non-overlapping, positive entries).
    pub day_totals: BTreeMap<u32, i64>,
    /// Entries that overlap another entry of the same day.
    pub overlaps: BTreeSet<EntryId>,
    /// Sum of the totals attached to rows.
    pub total_worked_seconds: i64,
}

impl MonthView {
    pub fn is_empty(&self) -> bool {
        self.serialized_by_day.is_empty()
    }

    pub fn is_overlap(&self, id: EntryId) -> bool {
        self.overlaps.contains(&id)
    }

    /// All rows, ordered by day and then by entry order within the day.
    pub fn rows(&self) -> impl Iterator<Item = &SerializedRow> {
        self.serialized_by_day.values().flatten()
    }

    pub fn row_count(&self) -> usize {
        self.serialized_by_day.values().map(Vec::len).sum()
    }

    pub fn day_total(&self, day: u32) -> i64 {
        self.day_totals.get(&day).copied().unwrap_or(0)
    }
}

/// Recompute the whole view of a month from its entries.
///
/// `entries` must be in bucket order (insertion / start-query order); the
/// serialization pass follows that order, not the sorted order used for
/// overlap detection.
pub fn aggregate(entries: &[TimeEntry]) -> MonthView {
    if entries.is_empty() {
        return MonthView::default();
    }

    let overlaps = detect_overlaps(entries);
    let day_totals = compute_day_totals(entries, &overlaps);

    let mut view = MonthView {
        serialized_by_day: BTreeMap::new(),
        day_totals,
        overlaps,
        total_worked_seconds: 0,
    };

    // -----------------------------
    // Serialization pass
    // -----------------------------
    let mut is_white = true;
    let mut current_date: Option<NaiveDate> = None;
    let mut days_with_total: BTreeSet<u32> = BTreeSet::new();

    for entry in entries {
        let entry_date = entry.start.date();
        let day = entry_date.day();

        let date = if current_date != Some(entry_date) {
            current_date = Some(entry_date);
            is_white = !is_white;
            Some(entry_date)
        } else {
            None
        };

        let is_overlap = view.overlaps.contains(&entry.id);
        let start = entry.start.time();
        let end = entry.end.time();

        let day_total_seconds = if !is_overlap && days_with_total.insert(day) {
            view.day_total(day)
        } else {
            0
        };
        view.total_worked_seconds += day_total_seconds;

        view.serialized_by_day
            .entry(day)
            .or_default()
            .push(SerializedRow {
                entry: entry.id,
                date,
                start,
                end,
                work_seconds: entry.work_seconds(),
                day_total_seconds,
                comment: entry.comment.clone(),
                is_white,
                is_time_bad: start > end,
                is_overlap,
            });
    }

    view
}

/// Entries of the same day whose `[start, end)` intervals intersect.
///
/// Each day is swept in start order; scanning for a given entry stops at the
/// first later entry that starts at or after its end.
pub fn detect_overlaps(entries: &[TimeEntry]) -> BTreeSet<EntryId> {
    let mut overlaps = BTreeSet::new();

    for day in group_by_day(entries).values_mut() {
        // stable: equal starts keep bucket order
        day.sort_by_key(|e| e.start);

        for i in 0..day.len() {
            for j in (i + 1)..day.len() {
                if day[i].end <= day[j].start {
                    break;
                }
                overlaps.insert(day[i].id);
                overlaps.insert(day[j].id);
            }
        }
    }

    overlaps
}

fn compute_day_totals(entries: &[TimeEntry], overlaps: &BTreeSet<EntryId>) -> BTreeMap<u32, i64> {
    let mut totals: BTreeMap<u32, i64> = BTreeMap::new();

    for entry in entries {
        let total = totals.entry(entry.start.day()).or_insert(0);
        let secs = (entry.end - entry.start).num_seconds();
        if secs > 0 && !overlaps.contains(&entry.id) {
            *total += secs;
        }
    }

    totals
}

fn group_by_day(entries: &[TimeEntry]) -> BTreeMap<u32, Vec<&TimeEntry>> {
    let mut days: BTreeMap<u32, Vec<&TimeEntry>> = BTreeMap::new();
    for entry in entries {
        days.entry(entry.start.day()).or_default().push(entry);
    }
    days
}
