//! Durable storage of time records.
//!
//! The repository only talks to [`TimeRecordStore`]; [`SqliteStore`] is the
//! production implementation on top of `time_table`.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::TimeRecord;
use rusqlite::Connection;

/// CRUD over time records keyed by an integer id.
///
/// Timestamps are whole seconds since epoch of naive local time.
pub trait TimeRecordStore {
    fn ensure_schema(&self) -> AppResult<()>;

    /// Insert a record and return its new id.
    fn insert(&self, start: i64, end: i64, comment: &str) -> AppResult<i64>;

    fn update(&self, id: i64, start: i64, end: i64, comment: &str) -> AppResult<()>;

    fn delete(&self, id: i64) -> AppResult<()>;

    /// Records with `lo <= start <= hi`, ordered by start ascending.
    fn query_range(&self, lo: i64, hi: i64) -> AppResult<Vec<TimeRecord>>;

    fn fetch(&self, id: i64) -> AppResult<Option<TimeRecord>>;
}

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open the database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

impl TimeRecordStore for SqliteStore {
    fn ensure_schema(&self) -> AppResult<()> {
        queries::ensure_time_table(self.conn())?;
        Ok(())
    }

    fn insert(&self, start: i64, end: i64, comment: &str) -> AppResult<i64> {
        queries::insert_record(self.conn(), start, end, comment)
    }

    fn update(&self, id: i64, start: i64, end: i64, comment: &str) -> AppResult<()> {
        if queries::update_record(self.conn(), id, start, end, comment)? == 0 {
            return Err(AppError::RecordNotFound(id));
        }
        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        queries::delete_record(self.conn(), id)?;
        Ok(())
    }

    fn query_range(&self, lo: i64, hi: i64) -> AppResult<Vec<TimeRecord>> {
        queries::load_records_in_range(self.conn(), lo, hi)
    }

    fn fetch(&self, id: i64) -> AppResult<Option<TimeRecord>> {
        queries::load_record(self.conn(), id)
    }
}
