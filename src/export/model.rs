use crate::core::aggregator::MonthView;
use crate::core::repository::EntryRepository;
use crate::db::store::TimeRecordStore;
use crate::utils::formatting::seconds_to_decimal_hours;
use crate::utils::time::format_hm;
use serde::Serialize;

/// Flat, serializable form of one grid row.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RowExport {
    pub id: i64,
    /// Always filled, unlike the grid where only the first row of a day
    /// shows the date.
    pub date: String,
    pub start: String,
    pub end: String,
    pub comment: String,
    pub hours: String,
    pub work_seconds: i64,
    /// Empty on rows that do not carry the day total.
    pub day_total: String,
    pub day_total_seconds: i64,
    pub overlap: bool,
    pub time_bad: bool,
}

impl RowExport {
    /// The cells as shown in the grid, in column order.
    pub(crate) fn grid_cells(&self, first_of_day: bool) -> Vec<String> {
        vec![
            if first_of_day { self.date.clone() } else { String::new() },
            self.start.clone(),
            self.end.clone(),
            self.comment.clone(),
            format_hm(self.work_seconds),
            if self.day_total_seconds > 0 {
                format_hm(self.day_total_seconds)
            } else {
                String::new()
            },
        ]
    }
}

/// Rows of `view` paired with "is this the first row of its day".
pub(crate) fn rows_from_view<S: TimeRecordStore>(
    repo: &EntryRepository<S>,
    view: &MonthView,
    decimal_comma: bool,
) -> Vec<(RowExport, bool)> {
    view.rows()
        .filter_map(|row| {
            let entry = repo.entry(row.entry)?;
            let carries_total = row.day_total_seconds > 0;
            Some((
                RowExport {
                    id: entry.record_id,
                    date: entry.date().format("%Y-%m-%d").to_string(),
                    start: row.start.format("%H:%M").to_string(),
                    end: row.end.format("%H:%M").to_string(),
                    comment: row.comment.clone(),
                    hours: seconds_to_decimal_hours(row.work_seconds, decimal_comma),
                    work_seconds: row.work_seconds,
                    day_total: if carries_total {
                        seconds_to_decimal_hours(row.day_total_seconds, decimal_comma)
                    } else {
                        String::new()
                    },
                    day_total_seconds: row.day_total_seconds,
                    overlap: row.is_overlap,
                    time_bad: row.is_time_bad,
                },
                row.date.is_some(),
            ))
        })
        .collect()
}
