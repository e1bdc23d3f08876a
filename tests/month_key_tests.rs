use chrono::NaiveDate;
use worktimer::core::month_key::MonthKey;
use worktimer::utils::time::{from_epoch, to_epoch};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("test date")
}

#[test]
fn test_key_value_and_parts() {
    let key = MonthKey::of(d(2025, 3, 17));
    assert_eq!(key.value(), 202503);
    assert_eq!(key.year(), 2025);
    assert_eq!(key.month(), 3);
    assert_eq!(key.to_string(), "2025-03");
}

#[test]
fn test_keys_order_chronologically() {
    assert!(MonthKey::of(d(2024, 12, 31)) < MonthKey::of(d(2025, 1, 1)));
    assert!(MonthKey::of(d(2025, 2, 1)) < MonthKey::of(d(2025, 10, 1)));
}

#[test]
fn test_new_rejects_invalid_month() {
    assert!(MonthKey::new(2025, 0).is_err());
    assert!(MonthKey::new(2025, 13).is_err());
    assert_eq!(
        MonthKey::new(2025, 12).expect("valid"),
        MonthKey::of(d(2025, 12, 5))
    );
}

#[test]
fn test_last_day_handles_leap_years_and_december() {
    assert_eq!(MonthKey::of(d(2024, 2, 1)).last_day(), d(2024, 2, 29));
    assert_eq!(MonthKey::of(d(2025, 2, 1)).last_day(), d(2025, 2, 28));
    assert_eq!(MonthKey::of(d(2025, 12, 1)).last_day(), d(2025, 12, 31));
}

#[test]
fn test_bounds_cover_whole_month() {
    let (lo, hi) = MonthKey::of(d(2025, 4, 10)).bounds();

    let lo = from_epoch(lo).expect("lo");
    let hi = from_epoch(hi).expect("hi");

    assert_eq!(lo.to_string(), "2025-04-01 00:00:00");
    assert_eq!(hi.to_string(), "2025-04-30 23:59:59");
    assert_eq!(to_epoch(hi) - to_epoch(lo), 30 * 86_400 - 1);
}
