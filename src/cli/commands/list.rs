use crate::cli::commands::{ensure_month, month_arg, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::grid::{GridOptions, month_header, render_month};
use crate::ui::messages::{header, info};
use crate::utils::date::month_name;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { month } = cmd {
        let key = month_arg(month)?;

        let mut tracker = open_tracker(cfg)?;
        ensure_month(&mut tracker, key)?;

        let opts = GridOptions {
            hourly_rate: cfg.hourly_rate,
            decimal_comma: cfg.decimal_comma,
            show_weekday: cfg.show_weekday.clone(),
        };

        match render_month(tracker.repo(), key, &opts) {
            Some(grid) => {
                let total = tracker.repo().month_view(key).total_worked_seconds;
                header(format!("📅 {}", month_header(key, total, &opts)));
                print!("{}", grid);
            }
            None => info(format!(
                "No entries for {} {}.",
                month_name(key.month()),
                key.year()
            )),
        }
    }
    Ok(())
}
