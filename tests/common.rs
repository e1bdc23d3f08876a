#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use worktimer::db::store::TimeRecordStore;
use worktimer::errors::{AppError, AppResult};
use worktimer::models::time_entry::TimeRecord;

pub fn wt() -> Command {
    cargo_bin_cmd!("worktimer")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worktimer.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and add two days of September 2025
pub fn init_db_with_data(db_path: &str) {
    wt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (date, start, end, comment) in [
        ("2025-09-01", "09:00", "12:00", "design"),
        ("2025-09-01", "13:00", "17:00", "review"),
        ("2025-09-15", "08:30", "12:30", "support"),
    ] {
        wt().args([
            "--db", db_path, "add", "--date", date, "--in", start, "--out", end, "--comment",
            comment,
        ])
        .assert()
        .success();
    }
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("test datetime")
}

/// In-memory store that can be switched into a failing state.
#[derive(Default)]
pub struct MemStore {
    pub records: RefCell<BTreeMap<i64, TimeRecord>>,
    pub next_id: Cell<i64>,
    pub fail: Cell<bool>,
    pub writes: Cell<usize>,
}

impl MemStore {
    pub fn failing() -> Self {
        let s = Self::default();
        s.fail.set(true);
        s
    }

    fn check(&self) -> AppResult<()> {
        if self.fail.get() {
            Err(AppError::StoreUnavailable("disk on fire".into()))
        } else {
            Ok(())
        }
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }
}

impl TimeRecordStore for MemStore {
    fn ensure_schema(&self) -> AppResult<()> {
        self.check()
    }

    fn insert(&self, start: i64, end: i64, comment: &str) -> AppResult<i64> {
        self.check()?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.writes.set(self.writes.get() + 1);
        self.records.borrow_mut().insert(
            id,
            TimeRecord {
                id,
                start,
                end,
                comment: comment.to_string(),
            },
        );
        Ok(id)
    }

    fn update(&self, id: i64, start: i64, end: i64, comment: &str) -> AppResult<()> {
        self.check()?;
        self.writes.set(self.writes.get() + 1);
        match self.records.borrow_mut().get_mut(&id) {
            Some(rec) => {
                rec.start = start;
                rec.end = end;
                rec.comment = comment.to_string();
                Ok(())
            }
            None => Err(AppError::RecordNotFound(id)),
        }
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        self.check()?;
        self.writes.set(self.writes.get() + 1);
        self.records.borrow_mut().remove(&id);
        Ok(())
    }

    fn query_range(&self, lo: i64, hi: i64) -> AppResult<Vec<TimeRecord>> {
        self.check()?;
        let mut out: Vec<TimeRecord> = self
            .records
            .borrow()
            .values()
            .filter(|r| r.start >= lo && r.start <= hi)
            .cloned()
            .collect();
        out.sort_by_key(|r| (r.start, r.id));
        Ok(out)
    }

    fn fetch(&self, id: i64) -> AppResult<Option<TimeRecord>> {
        self.check()?;
        Ok(self.records.borrow().get(&id).cloned())
    }
}
