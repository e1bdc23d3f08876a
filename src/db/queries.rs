use crate::errors::AppResult;
use crate::models::time_entry::TimeRecord;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Create `time_table` if it does not exist yet.
pub fn ensure_time_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS time_table (
            id      INTEGER PRIMARY KEY,
            start   INT NOT NULL,
            end     INT NOT NULL,
            comment VARCHAR(256) NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_time_table_start ON time_table(start);
        "#,
    )
}

pub fn map_row(row: &Row) -> Result<TimeRecord> {
    Ok(TimeRecord {
        id: row.get("id")?,
        start: row.get("start")?,
        end: row.get("end")?,
        // NULL comments can only come from hand-edited databases
        comment: row.get::<_, Option<String>>("comment")?.unwrap_or_default(),
    })
}

pub fn insert_record(conn: &Connection, start: i64, end: i64, comment: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_table (start, end, comment) VALUES (?1, ?2, ?3)",
        params![start, end, comment],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns the number of rows touched (0 when the id does not exist).
pub fn update_record(
    conn: &Connection,
    id: i64,
    start: i64,
    end: i64,
    comment: &str,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE time_table SET start = ?1, end = ?2, comment = ?3 WHERE id = ?4",
        params![start, end, comment, id],
    )?;
    Ok(n)
}

pub fn delete_record(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM time_table WHERE id = ?1", [id])?;
    Ok(n)
}

/// Records whose start lies in `[lo, hi]`, ordered by start.
pub fn load_records_in_range(conn: &Connection, lo: i64, hi: i64) -> AppResult<Vec<TimeRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, start, end, comment FROM time_table
         WHERE start >= ?1 AND start <= ?2
         ORDER BY start ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![lo, hi], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_record(conn: &Connection, id: i64) -> AppResult<Option<TimeRecord>> {
    let rec = conn
        .query_row(
            "SELECT id, start, end, comment FROM time_table WHERE id = ?1",
            [id],
            map_row,
        )
        .optional()?;
    Ok(rec)
}

// -----------------------------
// Running timer (single row)
// -----------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningTimerRow {
    pub record_id: i64,
    pub started_at: i64,
}

pub fn load_running_timer(conn: &Connection) -> AppResult<Option<RunningTimerRow>> {
    let row = conn
        .query_row(
            "SELECT record_id, started_at FROM running_timer WHERE id = 1",
            [],
            |row| {
                Ok(RunningTimerRow {
                    record_id: row.get(0)?,
                    started_at: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub fn save_running_timer(conn: &Connection, record_id: i64, started_at: i64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO running_timer (id, record_id, started_at) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET record_id = excluded.record_id,
                                       started_at = excluded.started_at",
        params![record_id, started_at],
    )?;
    Ok(())
}

pub fn clear_running_timer(conn: &Connection) -> AppResult<()> {
    conn.execute("DELETE FROM running_timer", [])?;
    Ok(())
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<(i64, String, String, String, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, IFNULL(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
