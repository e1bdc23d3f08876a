use crate::db::queries::ensure_time_table;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Single-row table holding the record of the running timer, so `stop`
/// can find what `start` opened in another process.
fn migrate_add_running_timer(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_add_running_timer";
    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS running_timer (
            id         INTEGER PRIMARY KEY CHECK (id = 1),
            record_id  INTEGER NOT NULL,
            started_at INT NOT NULL
        );
        "#,
    )?;

    mark_applied(conn, version, "Added running_timer table")?;
    success(format!("Migration applied: {} → added running_timer table", version));
    Ok(())
}

/// Older trackers inserted new records with `end = 0` and only filled the
/// end on stop; a crash in between left rows ending in 1970.
fn migrate_repair_zero_end(conn: &Connection) -> Result<()> {
    let version = "20250301_0002_repair_zero_end";
    if is_applied(conn, version)? {
        return Ok(());
    }

    let repaired = conn.execute("UPDATE time_table SET end = start WHERE end = 0", [])?;
    if repaired > 0 {
        warning(format!(
            "Repaired {} record(s) with a missing end time (end set to start).",
            repaired
        ));
    }

    mark_applied(
        conn,
        version,
        &format!("Repaired {} record(s) with end = 0", repaired),
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and every time a store is opened; each step is
/// idempotent.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Ensure time table
    let existed = table_exists(conn, "time_table")?;
    ensure_time_table(conn)?;
    if !existed {
        success("Created time_table.");
    }

    // 3) Versioned migrations
    migrate_add_running_timer(conn)?;
    migrate_repair_zero_end(conn)?;

    Ok(())
}
