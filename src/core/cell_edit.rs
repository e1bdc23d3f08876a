//! Grid cell edits: user-typed text for one column of one entry.
//!
//! Text that does not parse is rejected as a value, never as an error: the
//! entry keeps its previous value and nothing is written.

use crate::core::repository::EntryRepository;
use crate::db::store::TimeRecordStore;
use crate::errors::AppResult;
use crate::models::time_entry::{EntryId, TimeEntry};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static DATE_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-1][0-9])-([0-3][0-9])$").expect("date pattern"));

static TIME_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$").expect("time pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    Rejected(String),
}

impl<T> ParseOutcome<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Parsed(v) => ParseOutcome::Parsed(f(v)),
            ParseOutcome::Rejected(r) => ParseOutcome::Rejected(r),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellEdit {
    /// `YYYY-MM-DD`: moves both start and end to that date.
    Date(String),
    /// `H:MM` / `HH:MM` on the start date.
    Start(String),
    /// `H:MM` / `HH:MM` on the start date.
    End(String),
    Comment(String),
}

impl CellEdit {
    pub fn column(&self) -> &'static str {
        match self {
            CellEdit::Date(_) => "date",
            CellEdit::Start(_) => "start",
            CellEdit::End(_) => "end",
            CellEdit::Comment(_) => "comment",
        }
    }

    /// New `(start, end, comment)` of `entry` after this edit.
    pub fn resolve(&self, entry: &TimeEntry) -> ParseOutcome<(NaiveDateTime, NaiveDateTime, String)> {
        let comment = entry.comment.clone();
        match self {
            CellEdit::Date(text) => parse_date_cell(text).map(|d| {
                (
                    d.and_time(entry.start.time()),
                    d.and_time(entry.end.time()),
                    comment,
                )
            }),
            CellEdit::Start(text) => parse_time_cell(text)
                .map(|t| (entry.start.date().and_time(t), entry.end, comment)),
            CellEdit::End(text) => parse_time_cell(text)
                .map(|t| (entry.start, entry.start.date().and_time(t), comment)),
            CellEdit::Comment(text) => ParseOutcome::Parsed((entry.start, entry.end, text.clone())),
        }
    }
}

pub fn parse_date_cell(text: &str) -> ParseOutcome<NaiveDate> {
    let text = text.trim();
    let Some(caps) = DATE_CELL.captures(text) else {
        return ParseOutcome::Rejected(format!("'{}' is not a YYYY-MM-DD date", text));
    };

    let year = caps[1].parse::<i32>();
    let month = caps[2].parse::<u32>();
    let day = caps[3].parse::<u32>();

    match (year, month, day) {
        (Ok(y), Ok(m), Ok(d)) => match NaiveDate::from_ymd_opt(y, m, d) {
            Some(date) => ParseOutcome::Parsed(date),
            None => ParseOutcome::Rejected(format!("'{}' is not a calendar date", text)),
        },
        _ => ParseOutcome::Rejected(format!("'{}' is not a YYYY-MM-DD date", text)),
    }
}

pub fn parse_time_cell(text: &str) -> ParseOutcome<NaiveTime> {
    let text = text.trim();
    let Some(caps) = TIME_CELL.captures(text) else {
        return ParseOutcome::Rejected(format!("'{}' is not a HH:MM time", text));
    };

    match (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
        (Ok(h), Ok(m)) => match NaiveTime::from_hms_opt(h, m, 0) {
            Some(t) => ParseOutcome::Parsed(t),
            None => ParseOutcome::Rejected(format!("'{}' is not a valid time", text)),
        },
        _ => ParseOutcome::Rejected(format!("'{}' is not a HH:MM time", text)),
    }
}

/// Parse `edit` against the current entry and, when it parses, store it.
///
/// Unknown entries and rejected text leave everything untouched.
pub fn apply_cell_edit<S: TimeRecordStore>(
    repo: &mut EntryRepository<S>,
    id: EntryId,
    edit: &CellEdit,
) -> AppResult<ParseOutcome<()>> {
    let Some(entry) = repo.entry(id) else {
        return Ok(ParseOutcome::Rejected(format!("unknown entry {}", id)));
    };

    match edit.resolve(entry) {
        ParseOutcome::Parsed((start, end, comment)) => {
            repo.edit_entry(id, start, end, &comment)?;
            Ok(ParseOutcome::Parsed(()))
        }
        ParseOutcome::Rejected(reason) => Ok(ParseOutcome::Rejected(reason)),
    }
}
