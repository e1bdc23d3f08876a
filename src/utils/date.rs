use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse `YYYY-MM` into `(year, month)`.
pub fn parse_month(p: &str) -> Result<(i32, u32), String> {
    NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d")
        .map(|d| (d.year(), d.month()))
        .map_err(|_| format!("{} (expected YYYY-MM)", p))
}

pub fn current_month() -> (i32, u32) {
    let t = today();
    (t.year(), t.month())
}

pub fn month_name(m: u32) -> &'static str {
    match m {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}

/// ISO-8601 week number of the given date.
pub fn week_number(d: NaiveDate) -> u32 {
    d.iso_week().week()
}

pub fn weekday_label(d: NaiveDate, mode: &str) -> String {
    let full = d.format("%A").to_string();
    match mode.to_ascii_lowercase().as_str() {
        "short" => full.chars().take(2).collect(),
        "medium" => full.chars().take(3).collect(),
        "long" => full,
        _ => String::new(),
    }
}
