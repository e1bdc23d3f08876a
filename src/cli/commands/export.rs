use crate::cli::commands::{ensure_month, month_arg, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        month,
        force,
    } = cmd
    {
        let key = month_arg(month)?;

        let mut tracker = open_tracker(cfg)?;
        ensure_month(&mut tracker, key)?;

        let written = ExportLogic::export(
            tracker.repo(),
            key,
            *format,
            file,
            cfg.decimal_comma,
            *force,
        )?;

        if written > 0 {
            ttlog_or_warn(
                tracker.repo().store().conn(),
                "export",
                format.as_str(),
                &format!("Exported {} row(s) of {} to {}", written, key, file),
            );
        }
    }
    Ok(())
}
