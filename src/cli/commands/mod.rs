//! One module per subcommand, plus the wiring they share: opening the
//! store and rebuilding the tracker a previous invocation left behind.

pub mod add;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod start;
pub mod status;
pub mod stop;

use crate::config::Config;
use crate::core::month_key::MonthKey;
use crate::core::repository::EntryRepository;
use crate::core::tracker::Tracker;
use crate::db::queries::{clear_running_timer, load_running_timer, save_running_timer};
use crate::db::store::{SqliteStore, TimeRecordStore};
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::EntryId;
use crate::ui::messages::warning;
use crate::utils::date::{current_month, parse_month};
use crate::utils::time::{from_epoch, to_epoch};
use std::io::{self, Write};

/// Open the configured store and re-attach the running timer, if any.
///
/// The month holding the running entry is loaded so the timer can be
/// ticked; other months are loaded on demand with [`ensure_month`].
pub(crate) fn open_tracker(cfg: &Config) -> AppResult<Tracker<SqliteStore>> {
    let store = SqliteStore::open(&cfg.database)?;
    let running = load_running_timer(store.conn())?;
    let mut tracker = Tracker::new(EntryRepository::new(store));

    let Some(row) = running else {
        return Ok(tracker);
    };

    let record = tracker.repo().store().fetch(row.record_id)?;
    let start = record.as_ref().and_then(|r| from_epoch(r.start));

    match start {
        Some(start) => {
            ensure_month(&mut tracker, MonthKey::of_datetime(start))?;
            tracker.resume(row.record_id)?;
        }
        None => {
            warning(format!(
                "Running timer pointed to missing record {}; timer cleared.",
                row.record_id
            ));
            clear_running_timer(tracker.repo().store().conn())?;
        }
    }

    Ok(tracker)
}

/// Mirror the tracker's running state into the `running_timer` table.
pub(crate) fn sync_running_timer(tracker: &Tracker<SqliteStore>) -> AppResult<()> {
    let conn = tracker.repo().store().conn();
    match (tracker.running(), tracker.running_record()) {
        (Some(run), Some(record_id)) => save_running_timer(conn, record_id, to_epoch(run.started_at)),
        _ => clear_running_timer(conn),
    }
}

/// Load `key` from the store unless it is already in memory.
///
/// A loaded month is never reloaded: that would hand out new entry ids and
/// detach the running timer.
pub(crate) fn ensure_month(tracker: &mut Tracker<SqliteStore>, key: MonthKey) -> AppResult<()> {
    if tracker.repo().bucket(key).is_none() {
        tracker
            .repo_mut()
            .load_entries_for_month(key.year(), key.month())?;
    }
    Ok(())
}

/// `--month YYYY-MM`, or the current month.
pub(crate) fn month_arg(month: &Option<String>) -> AppResult<MonthKey> {
    let (year, month) = match month {
        Some(m) => parse_month(m).map_err(AppError::InvalidMonth)?,
        None => current_month(),
    };
    MonthKey::new(year, month)
}

/// Load the month of a stored record and return the entry built from it.
pub(crate) fn locate_record(
    tracker: &mut Tracker<SqliteStore>,
    record_id: i64,
) -> AppResult<EntryId> {
    if let Some(id) = tracker.repo().find_by_record(record_id) {
        return Ok(id);
    }

    let record = tracker
        .repo()
        .store()
        .fetch(record_id)?
        .ok_or(AppError::RecordNotFound(record_id))?;
    let start = from_epoch(record.start).ok_or_else(|| {
        AppError::InvalidDate(format!("record {} has an out-of-range start", record_id))
    })?;

    ensure_month(tracker, MonthKey::of_datetime(start))?;
    tracker
        .repo()
        .find_by_record(record_id)
        .ok_or(AppError::RecordNotFound(record_id))
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
