use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::{from_epoch, format_hms};
use rusqlite::Connection;
use std::fs;

pub fn print_db_info(conn: &Connection, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL RECORDS
    //
    let (count, first, last, worked): (i64, Option<i64>, Option<i64>, Option<i64>) = conn
        .query_row(
            "SELECT COUNT(*), MIN(start), MAX(start),
                    SUM(CASE WHEN end > start THEN end - start ELSE 0 END)
             FROM time_table",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

    println!(
        "{}• Total records:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    //
    // 3) DATE RANGE
    //
    let fmt = |ts: Option<i64>| {
        ts.and_then(from_epoch)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    //
    // 4) RAW WORKED TIME (overlaps not excluded)
    //
    println!(
        "{}• Recorded time:{} {}",
        CYAN,
        RESET,
        format_hms(worked.unwrap_or(0))
    );

    println!();
    Ok(())
}
