/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const ORANGE: &str = "\x1b[38;5;208m";
pub const CYAN: &str = "\x1b[36m";

/// Row color of the monthly grid:
/// overlap → red, end before start → orange,
/// otherwise the day band (white → default, grey → grey).
pub fn color_for_row(is_overlap: bool, is_time_bad: bool, is_white: bool) -> &'static str {
    if is_overlap {
        RED
    } else if is_time_bad {
        ORANGE
    } else if is_white {
        RESET
    } else {
        GREY
    }
}
