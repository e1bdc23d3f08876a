use crate::cli::commands::{open_tracker, sync_running_timer};
use crate::config::Config;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::ui::messages::timer;
use crate::utils::time::{format_hms, now};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;
    let record_id = tracker.running_record();

    let elapsed = tracker.stop_work(now())?;
    sync_running_timer(&tracker)?;

    let record = record_id.map(|r| r.to_string()).unwrap_or_default();
    let elapsed = format_hms(elapsed.num_seconds());
    timer(format!("Timer stopped after {} (record {})", elapsed, record));

    ttlog_or_warn(
        tracker.repo().store().conn(),
        "stop",
        &record,
        &format!("Timer stopped after {}", elapsed),
    );
    Ok(())
}
