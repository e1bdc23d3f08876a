use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, setup_test_db, wt};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates_database");

    wt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_list_month_grid() {
    let db_path = setup_test_db("list_month_grid");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "list", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(contains("September 2025"))
        .stdout(contains("11.00 h"))
        .stdout(contains("2025-09-01"))
        .stdout(contains("2025-09-15"))
        .stdout(contains("design"))
        .stdout(contains("07:00"));
}

#[test]
fn test_list_empty_month() {
    let db_path = setup_test_db("list_empty_month");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "list", "--month", "2025-10"])
        .assert()
        .success()
        .stdout(contains("No entries for October 2025"));
}

#[test]
fn test_list_invalid_month() {
    let db_path = setup_test_db("list_invalid_month");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "list", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}

#[test]
fn test_add_rejects_bad_time() {
    let db_path = setup_test_db("add_rejects_bad_time");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "add", "--date", "2025-09-02", "--in", "9h"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));
}

#[test]
fn test_add_warns_on_overlap() {
    let db_path = setup_test_db("add_warns_on_overlap");
    init_db_with_data(&db_path);

    wt().args([
        "--db", &db_path, "add", "--date", "2025-09-01", "--in", "11:00", "--out", "14:00",
    ])
    .assert()
    .success()
    .stdout(contains("overlaps"));
}

#[test]
fn test_edit_cells() {
    let db_path = setup_test_db("edit_cells");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "edit", "1", "--in", "08:00", "--comment", "planning"])
        .assert()
        .success()
        .stdout(contains("Record 1 updated"))
        .stdout(contains("08:00"));

    wt().args(["--db", &db_path, "list", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(contains("planning"))
        .stdout(contains("design").not());
}

#[test]
fn test_edit_rejected_cell_is_reported() {
    let db_path = setup_test_db("edit_rejected_cell");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "edit", "1", "--out", "25:99"])
        .assert()
        .success()
        .stdout(contains("end not changed"));
}

#[test]
fn test_edit_moves_entry_to_other_month() {
    let db_path = setup_test_db("edit_moves_entry");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "edit", "3", "--date", "2025-10-01"])
        .assert()
        .success();

    wt().args(["--db", &db_path, "list", "--month", "2025-10"])
        .assert()
        .success()
        .stdout(contains("support"));

    wt().args(["--db", &db_path, "list", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(contains("support").not());
}

#[test]
fn test_del_entry() {
    let db_path = setup_test_db("del_entry");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "del", "2", "--yes"])
        .assert()
        .success()
        .stdout(contains("Record 2 has been deleted"));

    wt().args(["--db", &db_path, "list", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(contains("review").not());
}

#[test]
fn test_del_unknown_record() {
    let db_path = setup_test_db("del_unknown_record");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "del", "99", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No time record with id 99"));
}

#[test]
fn test_start_status_stop() {
    let db_path = setup_test_db("start_status_stop");
    wt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    wt().args(["--db", &db_path, "start", "--comment", "focus"])
        .assert()
        .success()
        .stdout(contains("Timer started"));

    wt().args(["--db", &db_path, "start"])
        .assert()
        .failure()
        .stderr(contains("already running"));

    wt().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Week"))
        .stdout(contains("Working for").and(contains("focus")));

    wt().args(["--db", &db_path, "stop"])
        .assert()
        .success()
        .stdout(contains("Timer stopped"));

    wt().args(["--db", &db_path, "stop"])
        .assert()
        .failure()
        .stderr(contains("No timer is running"));

    wt().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("No timer is running"));
}

#[test]
fn test_running_entry_cannot_be_deleted() {
    let db_path = setup_test_db("running_entry_del");
    wt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    wt().args(["--db", &db_path, "start"]).assert().success();

    wt().args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("still running"));

    wt().args(["--db", &db_path, "stop"]).assert().success();

    wt().args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .success();
}

#[test]
fn test_log_print_shows_operations() {
    let db_path = setup_test_db("log_print");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .success();

    wt().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("add"))
        .stdout(contains("del"))
        .stdout(contains("migration_applied"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info_check");
    init_db_with_data(&db_path);

    wt().args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Total records"))
        .stdout(contains("Integrity check passed"));
}
