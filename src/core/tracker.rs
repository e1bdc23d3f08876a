//! The tracker context: the entry repository plus the running timer.
//!
//! Built once by the command handler and passed to whatever needs it; there
//! is no process-wide tracker.

use crate::core::repository::EntryRepository;
use crate::db::store::TimeRecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::EntryId;
use chrono::{Duration, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningTimer {
    pub entry: EntryId,
    pub started_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    /// The running entry now ends at the tick time.
    Extended(EntryId),
    /// The day changed: `closed` ends at 23:59:59 of its day and `continued`
    /// is the new running entry, starting at midnight.
    RolledOver { closed: EntryId, continued: EntryId },
}

pub struct Tracker<S: TimeRecordStore> {
    repo: EntryRepository<S>,
    running: Option<RunningTimer>,
}

impl<S: TimeRecordStore> Tracker<S> {
    pub fn new(repo: EntryRepository<S>) -> Self {
        Self {
            repo,
            running: None,
        }
    }

    pub fn repo(&self) -> &EntryRepository<S> {
        &self.repo
    }

    pub fn repo_mut(&mut self) -> &mut EntryRepository<S> {
        &mut self.repo
    }

    pub fn running(&self) -> Option<RunningTimer> {
        self.running
    }

    pub fn is_working(&self) -> bool {
        self.running.is_some()
    }

    /// Store id of the running entry.
    pub fn running_record(&self) -> Option<i64> {
        self.running
            .and_then(|r| self.repo.entry(r.entry))
            .map(|e| e.record_id)
    }

    /// Re-attach to a running entry that was loaded from storage.
    pub fn resume(&mut self, record_id: i64) -> AppResult<EntryId> {
        let id = self
            .repo
            .find_by_record(record_id)
            .ok_or(AppError::RecordNotFound(record_id))?;
        let started_at = self
            .repo
            .entry(id)
            .map(|e| e.start)
            .ok_or(AppError::RecordNotFound(record_id))?;

        self.running = Some(RunningTimer {
            entry: id,
            started_at,
        });
        Ok(id)
    }

    /// Open a new entry at `now` with `end == start`.
    pub fn start_work(&mut self, now: NaiveDateTime, comment: &str) -> AppResult<EntryId> {
        if self.running.is_some() {
            return Err(AppError::TimerAlreadyRunning(
                self.running_record().unwrap_or_default(),
            ));
        }

        let id = self.repo.add_entry(now, now, comment, 0)?;
        self.running = Some(RunningTimer {
            entry: id,
            started_at: now,
        });
        Ok(id)
    }

    /// Close the running entry at `now` and return how long its last segment ran.
    pub fn stop_work(&mut self, now: NaiveDateTime) -> AppResult<Duration> {
        if self.running.is_none() {
            return Err(AppError::TimerNotRunning);
        }

        self.tick(now)?;

        let run = self.running.take().ok_or(AppError::TimerNotRunning)?;
        Ok(now - run.started_at)
    }

    /// Push `now` into the running entry.
    ///
    /// Past midnight the running entry is closed at the end of its own day
    /// and a continuation entry (`"<comment> #2"`) takes over from 00:00:00.
    pub fn tick(&mut self, now: NaiveDateTime) -> AppResult<TickOutcome> {
        let Some(run) = self.running else {
            return Ok(TickOutcome::Idle);
        };

        let Some(entry) = self.repo.entry(run.entry).cloned() else {
            // deleted behind our back
            self.running = None;
            return Err(AppError::TimerNotRunning);
        };

        if now.date() <= entry.start.date() {
            self.repo
                .edit_entry(run.entry, entry.start, now, &entry.comment)?;
            return Ok(TickOutcome::Extended(run.entry));
        }

        let day_end = entry
            .start
            .date()
            .and_hms_opt(23, 59, 59)
            .unwrap_or(entry.start);
        self.repo
            .edit_entry(run.entry, entry.start, day_end, &entry.comment)?;

        let midnight = now.date().and_time(NaiveTime::MIN);
        let comment = format!("{} #2", entry.comment);
        let continued = self
            .repo
            .add_entry(midnight, now, comment.trim_start(), 0)?;

        self.running = Some(RunningTimer {
            entry: continued,
            started_at: midnight,
        });

        Ok(TickOutcome::RolledOver {
            closed: run.entry,
            continued,
        })
    }

    pub fn elapsed(&self, now: NaiveDateTime) -> Option<Duration> {
        self.running.map(|r| now - r.started_at)
    }

    /// Remove an entry, refusing the one the timer is writing to.
    pub fn remove_entry(&mut self, id: EntryId) -> AppResult<()> {
        if let Some(run) = self.running
            && run.entry == id
        {
            return Err(AppError::EntryRunning(
                self.running_record().unwrap_or_default(),
            ));
        }
        self.repo.remove_entry(id)
    }
}
