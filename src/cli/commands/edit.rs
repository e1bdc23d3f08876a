use crate::cli::commands::{locate_record, open_tracker, sync_running_timer};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::cell_edit::{CellEdit, ParseOutcome, apply_cell_edit};
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date,
        start,
        end,
        comment,
    } = cmd
    {
        let edits: Vec<CellEdit> = [
            date.clone().map(CellEdit::Date),
            start.clone().map(CellEdit::Start),
            end.clone().map(CellEdit::End),
            comment.clone().map(CellEdit::Comment),
        ]
        .into_iter()
        .flatten()
        .collect();

        if edits.is_empty() {
            info("Nothing to edit: use --date, --in, --out or --comment.");
            return Ok(());
        }

        let mut tracker = open_tracker(cfg)?;
        let entry = locate_record(&mut tracker, *id)?;

        let mut applied = Vec::new();
        for edit in &edits {
            match apply_cell_edit(tracker.repo_mut(), entry, edit)? {
                ParseOutcome::Parsed(()) => applied.push(edit.column()),
                ParseOutcome::Rejected(reason) => {
                    warning(format!("{} not changed: {}", edit.column(), reason))
                }
            }
        }

        if applied.is_empty() {
            return Ok(());
        }

        if tracker.running().is_some_and(|r| r.entry == entry) {
            sync_running_timer(&tracker)?;
        }

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

        success(format!("Record {} updated: {}", id, summary));

        ttlog_or_warn(
            tracker.repo().store().conn(),
            "edit",
            &id.to_string(),
            &format!("Changed {}: {}", applied.join(", "), summary),
        );
    }
    Ok(())
}
