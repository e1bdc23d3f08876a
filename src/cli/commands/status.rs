use crate::cli::commands::{open_tracker, sync_running_timer};
use crate::config::Config;
use crate::core::month_key::MonthKey;
use crate::core::tracker::TickOutcome;
use crate::errors::AppResult;
use crate::ui::messages::{info, timer};
use crate::utils::date::week_number;
use crate::utils::time::{format_hms, now};
use chrono::Datelike;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;
    let now = now();

    println!("📅 Week {}", week_number(now.date()));

    if !tracker.is_working() {
        info("No timer is running.");
        return Ok(());
    }

    if let TickOutcome::RolledOver { .. } = tracker.tick(now)? {
        info("Day changed while working: the entry was split at midnight.");
    }
    sync_running_timer(&tracker)?;

    let elapsed = tracker.elapsed(now).map(|d| d.num_seconds()).unwrap_or(0);
    let comment = tracker
        .running()
        .and_then(|r| tracker.repo().entry(r.entry))
        .map(|e| e.comment.clone())
        .unwrap_or_default();

    timer(format!("Working for {} '{}'", format_hms(elapsed), comment));

    let today = tracker
        .repo()
        .month_view(MonthKey::of_datetime(now))
        .day_total(now.day());
    println!("   Today so far: {}", format_hms(today));

    Ok(())
}
