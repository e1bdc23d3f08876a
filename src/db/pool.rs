//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use rusqlite::{Connection, OpenFlags};

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open (or create) the database file. Missing parent directories are
    /// reported as an unavailable store instead of being created.
    pub fn new(path: &str) -> AppResult<Self> {
        let path = expand_tilde(path);
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| AppError::StoreUnavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }
}
