use crate::cli::commands::{ask_confirmation, locate_record, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut tracker = open_tracker(cfg)?;
        let entry = locate_record(&mut tracker, *id)?;

        let summary = tracker
            .repo()
            .entry(entry)
            .map(|e| {
                format!(
                    "{} {}–{} '{}'",
                    e.date(),
                    e.start.format("%H:%M"),
                    e.end.format("%H:%M"),
                    e.comment
                )
            })
            .unwrap_or_default();

        if !*yes
            && !ask_confirmation(&format!(
                "Delete record {} ({})? This action is irreversible.",
                id, summary
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        tracker.remove_entry(entry)?;
        success(format!("Record {} has been deleted.", id));

        ttlog_or_warn(
            tracker.repo().store().conn(),
            "del",
            &id.to_string(),
            &format!("Deleted {}", summary),
        );
    }
    Ok(())
}
