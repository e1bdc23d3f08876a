use crate::cli::commands::{ensure_month, open_tracker, sync_running_timer};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::month_key::MonthKey;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::ui::messages::{timer, warning};
use crate::utils::time::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { comment } = cmd {
        let mut tracker = open_tracker(cfg)?;
        let now = now();

        ensure_month(&mut tracker, MonthKey::of_datetime(now))?;
        let id = tracker.start_work(now, comment)?;
        sync_running_timer(&tracker)?;

        let record_id = tracker.running_record().unwrap_or_default();
        timer(format!(
            "Timer started at {} (record {})",
            now.format("%Y-%m-%d %H:%M"),
            record_id
        ));

        if tracker.repo().month_view(MonthKey::of_datetime(now)).is_overlap(id) {
            warning("The new entry overlaps another entry of today.");
        }

        ttlog_or_warn(
            tracker.repo().store().conn(),
            "start",
            &record_id.to_string(),
            &format!("Timer started: '{}'", comment),
        );
    }
    Ok(())
}
