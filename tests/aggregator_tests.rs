mod common;
use common::dt;
use worktimer::core::aggregator::{aggregate, detect_overlaps};
use worktimer::models::time_entry::{EntryId, TimeEntry};

fn entry(id: u64, start: &str, end: &str) -> TimeEntry {
    TimeEntry::new(EntryId(id), 0, dt(start), dt(end), format!("e{id}"))
}

#[test]
fn test_overlapping_entries_contribute_nothing() {
    let entries = vec![
        entry(1, "2025-03-10 09:00:00", "2025-03-10 12:00:00"),
        entry(2, "2025-03-10 11:00:00", "2025-03-10 13:00:00"),
    ];

    let view = aggregate(&entries);

    assert!(view.is_overlap(EntryId(1)));
    assert!(view.is_overlap(EntryId(2)));
    assert_eq!(view.day_total(10), 0);
    assert_eq!(view.total_worked_seconds, 0);

    let rows = &view.serialized_by_day[&10];
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.is_overlap && r.day_total_seconds == 0));
}

#[test]
fn test_day_total_on_first_row_only() {
    let entries = vec![
        entry(1, "2025-03-10 09:00:00", "2025-03-10 12:00:00"),
        entry(2, "2025-03-10 13:00:00", "2025-03-10 17:00:00"),
    ];

    let view = aggregate(&entries);
    let rows = &view.serialized_by_day[&10];

    assert!(view.overlaps.is_empty());
    assert_eq!(rows[0].day_total_seconds, 25_200);
    assert_eq!(rows[1].day_total_seconds, 0);
    assert_eq!(rows[0].work_seconds, 10_800);
    assert_eq!(rows[1].work_seconds, 14_400);
    assert_eq!(view.total_worked_seconds, 25_200);
}

#[test]
fn test_zero_length_entry() {
    let entries = vec![entry(1, "2025-03-10 09:00:00", "2025-03-10 09:00:00")];

    let view = aggregate(&entries);
    let row = &view.serialized_by_day[&10][0];

    assert_eq!(row.work_seconds, 0);
    assert!(!row.is_time_bad);
    assert!(!row.is_overlap);
    assert_eq!(view.day_total(10), 0);
}

#[test]
fn test_end_before_start_is_time_bad() {
    let entries = vec![entry(1, "2025-03-10 23:00:00", "2025-03-10 01:00:00")];

    let view = aggregate(&entries);
    let row = &view.serialized_by_day[&10][0];

    assert!(row.is_time_bad);
    assert_eq!(row.work_seconds, 0);
    assert_eq!(view.total_worked_seconds, 0);
}

#[test]
fn test_total_skips_overlapping_first_row() {
    // 1 and 2 overlap, 3 is clean: the total goes on row 3.
    let entries = vec![
        entry(1, "2025-03-10 09:00:00", "2025-03-10 12:00:00"),
        entry(2, "2025-03-10 10:00:00", "2025-03-10 11:00:00"),
        entry(3, "2025-03-10 14:00:00", "2025-03-10 15:30:00"),
    ];

    let view = aggregate(&entries);
    let rows = &view.serialized_by_day[&10];

    assert_eq!(rows[0].day_total_seconds, 0);
    assert_eq!(rows[1].day_total_seconds, 0);
    assert_eq!(rows[2].day_total_seconds, 5_400);
    assert_eq!(view.total_worked_seconds, 5_400);
}

#[test]
fn test_touching_entries_do_not_overlap() {
    let entries = vec![
        entry(1, "2025-03-10 09:00:00", "2025-03-10 12:00:00"),
        entry(2, "2025-03-10 12:00:00", "2025-03-10 13:00:00"),
    ];
    assert!(detect_overlaps(&entries).is_empty());
}

#[test]
fn test_contained_entry_overlaps_past_a_short_neighbour() {
    // The long entry covers both later ones; the scan must not stop at the
    // short one in between.
    let entries = vec![
        entry(1, "2025-03-10 08:00:00", "2025-03-10 18:00:00"),
        entry(2, "2025-03-10 09:00:00", "2025-03-10 09:30:00"),
        entry(3, "2025-03-10 15:00:00", "2025-03-10 16:00:00"),
    ];

    let overlaps = detect_overlaps(&entries);
    assert!(overlaps.contains(&EntryId(1)));
    assert!(overlaps.contains(&EntryId(2)));
    assert!(overlaps.contains(&EntryId(3)));
}

#[test]
fn test_different_days_never_overlap() {
    let entries = vec![
        entry(1, "2025-03-10 09:00:00", "2025-03-10 17:00:00"),
        entry(2, "2025-03-11 09:00:00", "2025-03-11 17:00:00"),
    ];
    assert!(detect_overlaps(&entries).is_empty());
}

#[test]
fn test_overlap_is_symmetric_regardless_of_order() {
    let forward = vec![
        entry(1, "2025-03-10 09:00:00", "2025-03-10 12:00:00"),
        entry(2, "2025-03-10 11:00:00", "2025-03-10 13:00:00"),
        entry(3, "2025-03-10 15:00:00", "2025-03-10 16:00:00"),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    let a = detect_overlaps(&forward);
    let b = detect_overlaps(&backward);

    assert_eq!(a, b);
    assert!(a.contains(&EntryId(1)) && a.contains(&EntryId(2)));
    assert!(!a.contains(&EntryId(3)));
}

#[test]
fn test_aggregation_is_idempotent() {
    let entries = vec![
        entry(1, "2025-03-10 09:00:00", "2025-03-10 12:00:00"),
        entry(2, "2025-03-10 11:00:00", "2025-03-10 13:00:00"),
        entry(3, "2025-03-11 08:00:00", "2025-03-11 16:00:00"),
        entry(4, "2025-03-12 22:00:00", "2025-03-12 02:00:00"),
    ];

    assert_eq!(aggregate(&entries), aggregate(&entries));
}

#[test]
fn test_banding_and_date_labels() {
    let entries = vec![
        entry(1, "2025-03-10 09:00:00", "2025-03-10 10:00:00"),
        entry(2, "2025-03-10 11:00:00", "2025-03-10 12:00:00"),
        entry(3, "2025-03-11 09:00:00", "2025-03-11 10:00:00"),
        entry(4, "2025-03-12 09:00:00", "2025-03-12 10:00:00"),
    ];

    let view = aggregate(&entries);
    let rows: Vec<_> = view.rows().collect();

    assert!(rows[0].date.is_some());
    assert!(rows[1].date.is_none());
    assert!(rows[2].date.is_some());
    assert!(rows[3].date.is_some());

    // same band within a day, alternating between days
    assert_eq!(rows[0].is_white, rows[1].is_white);
    assert_ne!(rows[1].is_white, rows[2].is_white);
    assert_ne!(rows[2].is_white, rows[3].is_white);
}

#[test]
fn test_one_total_per_day_and_sum_matches() {
    let entries = vec![
        entry(1, "2025-03-03 09:00:00", "2025-03-03 12:00:00"),
        entry(2, "2025-03-03 13:00:00", "2025-03-03 17:00:00"),
        entry(3, "2025-03-04 09:00:00", "2025-03-04 12:00:00"),
        entry(4, "2025-03-04 10:00:00", "2025-03-04 11:00:00"),
        entry(5, "2025-03-05 10:00:00", "2025-03-05 09:00:00"),
    ];

    let view = aggregate(&entries);

    for rows in view.serialized_by_day.values() {
        let carriers = rows.iter().filter(|r| r.day_total_seconds > 0).count();
        assert!(carriers <= 1);
        assert!(rows.iter().all(|r| r.work_seconds >= 0 && r.day_total_seconds >= 0));
    }

    let sum: i64 = view.rows().map(|r| r.day_total_seconds).sum();
    assert_eq!(sum, view.total_worked_seconds);
    assert_eq!(view.total_worked_seconds, 7 * 3600);
}

#[test]
fn test_rows_follow_entry_order_not_start_order() {
    let entries = vec![
        entry(1, "2025-03-10 14:00:00", "2025-03-10 15:00:00"),
        entry(2, "2025-03-10 09:00:00", "2025-03-10 10:00:00"),
    ];

    let view = aggregate(&entries);
    let ids: Vec<_> = view.rows().map(|r| r.entry).collect();

    assert_eq!(ids, vec![EntryId(1), EntryId(2)]);
    assert_eq!(view.serialized_by_day[&10][0].day_total_seconds, 7_200);
}

#[test]
fn test_empty_month() {
    let view = aggregate(&[]);
    assert!(view.is_empty());
    assert_eq!(view.row_count(), 0);
    assert_eq!(view.total_worked_seconds, 0);
}
