use crate::cli::commands::{ensure_month, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::month_key::MonthKey;
use crate::db::log::ttlog_or_warn;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date;
use crate::utils::time::{format_hm, now, parse_optional_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date: date_arg,
        start,
        end,
        comment,
    } = cmd
    {
        let now = now();

        let d = match date_arg {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => now.date(),
        };
        let start_t = parse_optional_time(start.as_ref())?.unwrap_or(now.time());
        let end_t = parse_optional_time(end.as_ref())?.unwrap_or(start_t);

        let start_dt = d.and_time(start_t);
        let end_dt = d.and_time(end_t);
        let key = MonthKey::of(d);

        let mut tracker = open_tracker(cfg)?;
        ensure_month(&mut tracker, key)?;

        let id = tracker.repo_mut().add_entry(start_dt, end_dt, comment, 0)?;
        let record_id = tracker
            .repo()
            .entry(id)
            .map(|e| e.record_id)
            .unwrap_or_default();

        success(format!(
            "Added record {}: {} {}–{} ({})",
            record_id,
            d,
            start_dt.format("%H:%M"),
            end_dt.format("%H:%M"),
            format_hm((end_dt - start_dt).num_seconds())
        ));

        if end_dt < start_dt {
            warning("End is before start: the entry counts as zero.");
        }
        if tracker.repo().month_view(key).is_overlap(id) {
            warning("The entry overlaps another entry of the same day.");
        }

        ttlog_or_warn(
            tracker.repo().store().conn(),
            "add",
            &record_id.to_string(),
            &format!("Added {} {}–{} '{}'", d, start_dt.format("%H:%M"), end_dt.format("%H:%M"), comment),
        );
    }
    Ok(())
}
