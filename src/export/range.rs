// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Parse --range (year / month / day / interval) into calendar day bounds,
/// both inclusive. Time conversion is the caller's job.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "range bounds must share a format: '{r}'"
            )));
        }

        let (d1, _) = parse_single(start)?;
        let (_, d2) = parse_single(end)?;

        if d2 < d1 {
            return Err(AppError::InvalidDate(format!(
                "range end precedes range start: '{r}'"
            )));
        }

        Ok((d1, d2))
    } else {
        parse_single(r)
    }
}

/// One calendar expression → the first and last day it covers.
fn parse_single(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match s.len() {
        // YYYY
        4 => {
            let y: i32 = s
                .parse()
                .map_err(|_| AppError::InvalidDate(format!("invalid year: '{s}'")))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1)
                .ok_or_else(|| AppError::InvalidDate(format!("invalid year: '{s}'")))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31)
                .ok_or_else(|| AppError::InvalidDate(format!("invalid year: '{s}'")))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let y: i32 = s[0..4]
                .parse()
                .map_err(|_| AppError::InvalidDate(format!("invalid month: '{s}'")))?;
            let m: u32 = s[5..7]
                .parse()
                .map_err(|_| AppError::InvalidDate(format!("invalid month: '{s}'")))?;
            let last = month_last_day(y, m)
                .ok_or_else(|| AppError::InvalidDate(format!("invalid month: '{s}'")))?;

            let d1 = NaiveDate::from_ymd_opt(y, m, 1)
                .ok_or_else(|| AppError::InvalidDate(format!("invalid month: '{s}'")))?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last)
                .ok_or_else(|| AppError::InvalidDate(format!("invalid month: '{s}'")))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(format!("invalid date: '{s}'")))?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidDate(format!(
            "unsupported --range format: '{s}'"
        ))),
    }
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}
