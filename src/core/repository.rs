//! In-memory time entries, grouped by month and mirrored to a
//! [`TimeRecordStore`].
//!
//! Every mutating call writes the store first and touches memory only once
//! the write succeeded, then re-aggregates the affected month(s). A caller
//! therefore never observes a [`MonthView`] that is out of date with the
//! entries, and a failing store leaves the repository exactly as it was.

use crate::core::aggregator::{MonthView, aggregate};
use crate::core::month_key::MonthKey;
use crate::db::store::TimeRecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{EntryId, TimeEntry};
use crate::utils::time::{from_epoch, to_epoch};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};

static EMPTY_VIEW: MonthView = MonthView {
    serialized_by_day: BTreeMap::new(),
    day_totals: BTreeMap::new(),
    overlaps: BTreeSet::new(),
    total_worked_seconds: 0,
};

/// All state of one `(year, month)`.
#[derive(Debug, Default)]
pub struct MonthlyBucket {
    entries: Vec<TimeEntry>,
    view: MonthView,
}

impl MonthlyBucket {
    /// Entries in insertion order.
    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn view(&self) -> &MonthView {
        &self.view
    }

    fn refresh(&mut self) {
        self.view = aggregate(&self.entries);
    }
}

pub struct EntryRepository<S: TimeRecordStore> {
    store: S,
    buckets: BTreeMap<MonthKey, MonthlyBucket>,
    next_id: u64,
}

impl<S: TimeRecordStore> EntryRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            buckets: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bucket(&self, key: MonthKey) -> Option<&MonthlyBucket> {
        self.buckets.get(&key)
    }

    /// Derived view of a month; a month without entries has an empty view.
    pub fn month_view(&self, key: MonthKey) -> &MonthView {
        self.buckets.get(&key).map(|b| &b.view).unwrap_or(&EMPTY_VIEW)
    }

    pub fn entries_of(&self, key: MonthKey) -> &[TimeEntry] {
        self.buckets
            .get(&key)
            .map(|b| b.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn months(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.buckets.keys().copied()
    }

    pub fn entry(&self, id: EntryId) -> Option<&TimeEntry> {
        self.locate(id)
            .map(|(key, idx)| &self.buckets[&key].entries[idx])
    }

    pub fn find_by_record(&self, record_id: i64) -> Option<EntryId> {
        self.buckets
            .values()
            .flat_map(|b| b.entries.iter())
            .find(|e| e.record_id == record_id)
            .map(|e| e.id)
    }

    /// Re-derive the view of one month from its current entries.
    pub fn aggregate_month(&mut self, key: MonthKey) {
        if let Some(bucket) = self.buckets.get_mut(&key) {
            bucket.refresh();
        }
    }

    /// Add an entry to the bucket of its start month.
    ///
    /// With `record_id == 0` a new record is inserted first and its id is
    /// kept on the entry; any other `record_id` hydrates an already stored
    /// record without writing.
    pub fn add_entry(
        &mut self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        comment: &str,
        record_id: i64,
    ) -> AppResult<EntryId> {
        let record_id = if record_id == 0 {
            self.store.ensure_schema()?;
            self.store.insert(to_epoch(start), to_epoch(end), comment)?
        } else {
            record_id
        };

        let key = MonthKey::of_datetime(start);
        let id = self.push_entry(start, end, comment, record_id);
        self.aggregate_month(key);
        Ok(id)
    }

    /// Replace start, end and comment of an entry. Unknown ids are ignored.
    ///
    /// When the new start lies in another month the entry moves to that
    /// month's bucket, and both months are re-aggregated.
    pub fn edit_entry(
        &mut self,
        id: EntryId,
        start: NaiveDateTime,
        end: NaiveDateTime,
        comment: &str,
    ) -> AppResult<()> {
        self.update_entry(id, |e| {
            e.start = start;
            e.end = end;
            e.comment = comment.to_string();
        })
    }

    /// Apply `change` to a copy of the entry, persist the copy and only then
    /// make it the current value. Unknown ids are ignored.
    pub fn update_entry<F>(&mut self, id: EntryId, change: F) -> AppResult<()>
    where
        F: FnOnce(&mut TimeEntry),
    {
        let Some((key, idx)) = self.locate(id) else {
            return Ok(());
        };

        let current = &self.buckets[&key].entries[idx];
        let mut updated = current.clone();
        change(&mut updated);
        updated.id = current.id;
        updated.record_id = current.record_id;

        updated.record_id = self.persist(&updated)?;
        if let Some(bucket) = self.buckets.get_mut(&key) {
            bucket.entries[idx] = updated;
        }

        self.settle(key, idx);
        Ok(())
    }

    /// Write the current in-memory values of an entry back to the store.
    pub fn save_entry(&mut self, id: EntryId) -> AppResult<()> {
        let Some((key, idx)) = self.locate(id) else {
            return Ok(());
        };

        let record_id = self.persist(&self.buckets[&key].entries[idx])?;
        if let Some(bucket) = self.buckets.get_mut(&key) {
            bucket.entries[idx].record_id = record_id;
        }

        self.settle(key, idx);
        Ok(())
    }

    /// Delete the record, then drop the entry. Unknown ids are ignored.
    pub fn remove_entry(&mut self, id: EntryId) -> AppResult<()> {
        let Some((key, idx)) = self.locate(id) else {
            return Ok(());
        };

        let record_id = self.buckets[&key].entries[idx].record_id;
        if record_id != 0 {
            self.store.delete(record_id)?;
        }

        if let Some(bucket) = self.buckets.get_mut(&key) {
            bucket.entries.remove(idx);
            if bucket.entries.is_empty() {
                self.buckets.remove(&key);
            } else {
                bucket.refresh();
            }
        }
        Ok(())
    }

    /// Replace the month's bucket with what the store holds for it.
    ///
    /// Records are queried and converted before anything in memory is
    /// touched. Returns the number of entries loaded.
    pub fn load_entries_for_month(&mut self, year: i32, month: u32) -> AppResult<usize> {
        let key = MonthKey::new(year, month)?;
        let (lo, hi) = key.bounds();

        let records = self.store.query_range(lo, hi)?;
        let mut rows = Vec::with_capacity(records.len());
        for rec in records {
            let start = from_epoch(rec.start).ok_or_else(|| bad_timestamp(rec.id, rec.start))?;
            let end = from_epoch(rec.end).ok_or_else(|| bad_timestamp(rec.id, rec.end))?;
            rows.push((start, end, rec.comment, rec.id));
        }

        self.buckets.remove(&key);
        let count = rows.len();
        for (start, end, comment, record_id) in rows {
            self.push_entry(start, end, &comment, record_id);
        }
        self.aggregate_month(key);

        Ok(count)
    }

    // -----------------------------
    // internals
    // -----------------------------

    fn push_entry(
        &mut self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        comment: &str,
        record_id: i64,
    ) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        self.buckets
            .entry(MonthKey::of_datetime(start))
            .or_default()
            .entries
            .push(TimeEntry::new(id, record_id, start, end, comment));
        id
    }

    fn locate(&self, id: EntryId) -> Option<(MonthKey, usize)> {
        self.buckets.iter().find_map(|(key, bucket)| {
            bucket
                .entries
                .iter()
                .position(|e| e.id == id)
                .map(|idx| (*key, idx))
        })
    }

    /// Insert or update, returning the record id now backing the entry.
    fn persist(&self, entry: &TimeEntry) -> AppResult<i64> {
        let rec = entry.to_record();
        if entry.is_persisted() {
            self.store.update(rec.id, rec.start, rec.end, &rec.comment)?;
            Ok(rec.id)
        } else {
            self.store.ensure_schema()?;
            self.store.insert(rec.start, rec.end, &rec.comment)
        }
    }

    /// Move the entry at `(key, idx)` to the bucket of its start month if
    /// needed, then re-aggregate every bucket it touched.
    fn settle(&mut self, key: MonthKey, idx: usize) {
        let target = match self.buckets.get(&key) {
            Some(bucket) => MonthKey::of_datetime(bucket.entries[idx].start),
            None => return,
        };

        if target == key {
            self.aggregate_month(key);
            return;
        }

        if let Some(bucket) = self.buckets.get_mut(&key) {
            let entry = bucket.entries.remove(idx);
            if bucket.entries.is_empty() {
                self.buckets.remove(&key);
            } else {
                bucket.refresh();
            }
            let dest = self.buckets.entry(target).or_default();
            dest.entries.push(entry);
            dest.refresh();
        }
    }
}

fn bad_timestamp(record_id: i64, ts: i64) -> AppError {
    AppError::InvalidDate(format!("record {} has an out-of-range timestamp {}", record_id, ts))
}
