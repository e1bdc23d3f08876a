//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

/// Pad to `width` terminal columns (not bytes), so accented comments line up.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Decimal hours with two digits, e.g. `27000` → `7.50`.
/// `comma` swaps the decimal point for a comma (European spreadsheets).
pub fn seconds_to_decimal_hours(secs: i64, comma: bool) -> String {
    let s = format!("{:.2}", secs as f64 / 3600.0);
    if comma { s.replacen('.', ",", 1) } else { s }
}

/// Earnings for `secs` worked at `hourly_rate`, two decimals.
pub fn earnings(secs: i64, hourly_rate: f64, comma: bool) -> String {
    let s = format!("{:.2}", secs as f64 / 3600.0 * hourly_rate);
    if comma { s.replacen('.', ",", 1) } else { s }
}
