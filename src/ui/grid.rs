//! Terminal rendering of a month: the grid behind `list`.

use crate::core::aggregator::SerializedRow;
use crate::core::month_key::MonthKey;
use crate::core::repository::EntryRepository;
use crate::db::store::TimeRecordStore;
use crate::utils::colors::color_for_row;
use crate::utils::date::{month_name, weekday_label};
use crate::utils::formatting::{earnings, seconds_to_decimal_hours};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_hm;

#[derive(Debug, Clone)]
pub struct GridOptions {
    pub hourly_rate: f64,
    pub decimal_comma: bool,
    pub show_weekday: String,
}

/// `March 2025: 7.50 h / 75.00`
pub fn month_header(key: MonthKey, total_seconds: i64, opts: &GridOptions) -> String {
    format!(
        "{} {}: {} h / {}",
        month_name(key.month()),
        key.year(),
        seconds_to_decimal_hours(total_seconds, opts.decimal_comma),
        earnings(total_seconds, opts.hourly_rate, opts.decimal_comma)
    )
}

fn date_cell(row: &SerializedRow, show_weekday: &str) -> String {
    let Some(date) = row.date else {
        return String::new();
    };

    let label = weekday_label(date, show_weekday);
    if label.is_empty() {
        date.format("%Y-%m-%d").to_string()
    } else {
        format!("{} {}", date.format("%Y-%m-%d"), label)
    }
}

/// Grid of one month, or `None` when the month has no entries.
pub fn render_month<S: TimeRecordStore>(
    repo: &EntryRepository<S>,
    key: MonthKey,
    opts: &GridOptions,
) -> Option<String> {
    let view = repo.month_view(key);
    if view.is_empty() {
        return None;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("Date", 10),
        Column::new("Start", 5),
        Column::new("End", 5),
        Column::new("Comment", 20),
        Column::new("Hours", 5),
        Column::new("Total Work", 10),
    ]);

    for row in view.rows() {
        let record = repo
            .entry(row.entry)
            .map(|e| e.record_id.to_string())
            .unwrap_or_default();

        let total = if row.day_total_seconds > 0 {
            format_hm(row.day_total_seconds)
        } else {
            String::new()
        };

        table.add_row(
            vec![
                record,
                date_cell(row, &opts.show_weekday),
                row.start.format("%H:%M").to_string(),
                row.end.format("%H:%M").to_string(),
                row.comment.clone(),
                format_hm(row.work_seconds),
                total,
            ],
            color_for_row(row.is_overlap, row.is_time_bad, row.is_white),
        );
    }

    Some(table.render())
}
