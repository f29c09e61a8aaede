use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDateTime;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let visits: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM visits", [], |row| row.get(0))?;
    let users: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    let sessions: i64 = pool.conn.query_row(
        "SELECT COUNT(DISTINCT session_id) FROM visits",
        [],
        |row| row.get(0),
    )?;

    println!(
        "{}• Total visits:{} {}{}{}",
        CYAN, RESET, GREEN, visits, RESET
    );
    println!("{}• Total users:{} {}{}{}", CYAN, RESET, GREEN, users, RESET);
    println!(
        "{}• Distinct sessions:{} {}{}{}",
        CYAN, RESET, GREEN, sessions, RESET
    );

    //
    // 3) TIME RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT visited_at FROM visits ORDER BY visited_at ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT visited_at FROM visits ORDER BY visited_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Visit range (UTC):{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE VISITS/DAY
    //
    if let (Some(f), Some(l)) = (first, last) {
        let d1 = parse_ts(&f)?;
        let d2 = parse_ts(&l)?;
        let days = (d2 - d1).num_days().max(1);

        let avg = visits as f64 / days as f64;
        println!("{}• Average visits/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

fn parse_ts(ts: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
