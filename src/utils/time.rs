//! Time utilities: stored-timestamp parsing, window bounds, local rendering.
//!
//! Visits are stored as UTC `YYYY-MM-DD HH:MM:SS` strings and converted to
//! the local timezone only at display time, so day-window filters compare
//! like with like.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Storage format for every timestamp column.
pub const STORE_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn format_store(dt: DateTime<Utc>) -> String {
    dt.format(STORE_FMT).to_string()
}

pub fn parse_store(s: &str) -> AppResult<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, STORE_FMT)
        .map_err(|_| AppError::InvalidDate(s.to_string()))?;
    Ok(naive.and_utc())
}

/// Renders a stored UTC timestamp in the local timezone with `fmt`.
pub fn to_local_display(stored: &str, fmt: &str) -> AppResult<String> {
    let dt = parse_store(stored)?;
    Ok(dt.with_timezone(&Local).format(fmt).to_string())
}

/// Stored-format lower bound of a rolling window of `days` days ending now.
pub fn window_start(now: DateTime<Utc>, days: u32) -> String {
    format_store(now - Duration::days(i64::from(days)))
}

/// Minutes elapsed between a stored timestamp and `now`.
pub fn minutes_since(stored: &str, now: DateTime<Utc>) -> AppResult<i64> {
    let dt = parse_store(stored)?;
    Ok((now - dt).num_minutes())
}

/// Whole days elapsed between a stored timestamp and `now`.
pub fn days_since(stored: &str, now: DateTime<Utc>) -> AppResult<i64> {
    Ok(minutes_since(stored, now)? / (60 * 24))
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Stored-format UTC bounds `[start, end)` for an inclusive range of local
/// calendar days. Local midnights are resolved first, then converted, so a
/// visit at 23:30 local time belongs to its local day.
pub fn local_day_bounds(first: NaiveDate, last: NaiveDate) -> AppResult<(String, String)> {
    let start = local_midnight_utc(first)?;
    let end = local_midnight_utc(last + Duration::days(1))?;
    Ok((format_store(start), format_store(end)))
}

fn local_midnight_utc(day: NaiveDate) -> AppResult<DateTime<Utc>> {
    let naive = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))?;

    // DST may skip or double a local midnight; take the earliest reading.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))
}
