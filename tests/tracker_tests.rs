mod common;
use common::{MemStore, dt};
use worktimer::core::month_key::MonthKey;
use worktimer::core::repository::EntryRepository;
use worktimer::core::tracker::{TickOutcome, Tracker};
use worktimer::errors::AppError;

fn tracker() -> Tracker<MemStore> {
    Tracker::new(EntryRepository::new(MemStore::default()))
}

#[test]
fn test_start_tick_stop() {
    let mut t = tracker();

    let id = t.start_work(dt("2025-03-10 09:00:00"), "coding").expect("start");
    let e = t.repo().entry(id).expect("entry");
    assert_eq!(e.start, e.end);
    assert!(e.is_persisted());

    let outcome = t.tick(dt("2025-03-10 10:15:00")).expect("tick");
    assert_eq!(outcome, TickOutcome::Extended(id));
    assert_eq!(t.repo().entry(id).expect("entry").end, dt("2025-03-10 10:15:00"));

    let elapsed = t.stop_work(dt("2025-03-10 11:00:00")).expect("stop");
    assert_eq!(elapsed.num_seconds(), 7_200);
    assert!(!t.is_working());
    assert_eq!(t.repo().entry(id).expect("entry").end, dt("2025-03-10 11:00:00"));
}

#[test]
fn test_double_start_is_refused() {
    let mut t = tracker();
    t.start_work(dt("2025-03-10 09:00:00"), "a").expect("start");

    let again = t.start_work(dt("2025-03-10 09:05:00"), "b");
    assert!(matches!(again, Err(AppError::TimerAlreadyRunning(_))));
    assert_eq!(t.repo().entries_of(MonthKey::new(2025, 3).expect("m")).len(), 1);
}

#[test]
fn test_stop_when_idle() {
    let mut t = tracker();
    assert!(matches!(
        t.stop_work(dt("2025-03-10 09:00:00")),
        Err(AppError::TimerNotRunning)
    ));
    assert_eq!(t.tick(dt("2025-03-10 09:00:00")).expect("tick"), TickOutcome::Idle);
}

#[test]
fn test_tick_across_midnight_creates_continuation() {
    let mut t = tracker();
    let first = t.start_work(dt("2025-03-10 22:00:00"), "deploy").expect("start");

    let outcome = t.tick(dt("2025-03-11 00:30:00")).expect("tick");
    let TickOutcome::RolledOver { closed, continued } = outcome else {
        panic!("expected rollover, got {outcome:?}");
    };
    assert_eq!(closed, first);

    let old = t.repo().entry(first).expect("old");
    assert_eq!(old.end, dt("2025-03-10 23:59:59"));

    let new = t.repo().entry(continued).expect("new");
    assert_eq!(new.start, dt("2025-03-11 00:00:00"));
    assert_eq!(new.end, dt("2025-03-11 00:30:00"));
    assert_eq!(new.comment, "deploy #2");
    assert_eq!(t.running().map(|r| r.entry), Some(continued));

    let elapsed = t.stop_work(dt("2025-03-11 01:00:00")).expect("stop");
    assert_eq!(elapsed.num_seconds(), 3_600);
}

#[test]
fn test_rollover_into_next_month() {
    let mut t = tracker();
    t.start_work(dt("2025-03-31 23:00:00"), "").expect("start");

    t.tick(dt("2025-04-01 00:10:00")).expect("tick");

    let april = MonthKey::new(2025, 4).expect("m");
    assert_eq!(t.repo().entries_of(april).len(), 1);
    assert_eq!(t.repo().entries_of(april)[0].comment, "#2");
    assert_eq!(t.repo().month_view(april).total_worked_seconds, 600);
}

#[test]
fn test_running_entry_cannot_be_removed() {
    let mut t = tracker();
    let id = t.start_work(dt("2025-03-10 09:00:00"), "x").expect("start");

    assert!(matches!(t.remove_entry(id), Err(AppError::EntryRunning(_))));
    assert!(t.repo().entry(id).is_some());

    t.stop_work(dt("2025-03-10 10:00:00")).expect("stop");
    t.remove_entry(id).expect("remove after stop");
    assert!(t.repo().entry(id).is_none());
}

#[test]
fn test_resume_from_stored_record() {
    let mut repo = EntryRepository::new(MemStore::default());
    let id = repo
        .add_entry(dt("2025-03-10 09:00:00"), dt("2025-03-10 09:00:00"), "x", 0)
        .expect("add");
    let record_id = repo.entry(id).expect("entry").record_id;

    let mut t = Tracker::new(repo);
    assert_eq!(t.resume(record_id).expect("resume"), id);
    assert_eq!(
        t.elapsed(dt("2025-03-10 09:30:00")).map(|d| d.num_seconds()),
        Some(1_800)
    );
    assert!(matches!(t.resume(777), Err(AppError::RecordNotFound(777))));
}

#[test]
fn test_failed_start_leaves_tracker_idle() {
    let mut t = Tracker::new(EntryRepository::new(MemStore::failing()));
    assert!(t.start_work(dt("2025-03-10 09:00:00"), "x").is_err());
    assert!(!t.is_working());
}
