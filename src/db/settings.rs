//! Alert settings stored in the `settings` key/value table.
//!
//! Settings live in the database rather than the YAML config because they
//! describe the tracked dataset, not the local installation.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};

pub const KEY_ENABLED: &str = "alerts_enabled";
pub const KEY_TEST_MODE: &str = "alerts_test_mode";
pub const KEY_DAYS_THRESHOLD: &str = "alerts_days_threshold";

pub const THRESHOLD_MIN: u32 = 1;
pub const THRESHOLD_MAX: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertSettings {
    pub enabled: bool,
    pub test_mode: bool,
    pub days_threshold: u32,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            test_mode: true,
            days_threshold: 7,
        }
    }
}

pub fn get(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?1",
            [key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Loads the alert settings, falling back to defaults for missing or
/// unreadable keys (a fresh table is seeded by the migrations anyway).
pub fn load_alert_settings(conn: &Connection) -> AppResult<AlertSettings> {
    let defaults = AlertSettings::default();

    let enabled = match get(conn, KEY_ENABLED)? {
        Some(v) => v == "1",
        None => defaults.enabled,
    };
    let test_mode = match get(conn, KEY_TEST_MODE)? {
        Some(v) => v == "1",
        None => defaults.test_mode,
    };
    let days_threshold = match get(conn, KEY_DAYS_THRESHOLD)? {
        Some(v) => v.parse::<u32>().unwrap_or(defaults.days_threshold),
        None => defaults.days_threshold,
    };

    Ok(AlertSettings {
        enabled,
        test_mode,
        days_threshold,
    })
}

pub fn set_enabled(conn: &Connection, enabled: bool) -> AppResult<()> {
    set(conn, KEY_ENABLED, if enabled { "1" } else { "0" })
}

pub fn set_test_mode(conn: &Connection, test_mode: bool) -> AppResult<()> {
    set(conn, KEY_TEST_MODE, if test_mode { "1" } else { "0" })
}

pub fn set_days_threshold(conn: &Connection, days: u32) -> AppResult<()> {
    if !(THRESHOLD_MIN..=THRESHOLD_MAX).contains(&days) {
        return Err(AppError::InvalidWindow(format!(
            "days threshold must be between {} and {}, got {}",
            THRESHOLD_MIN, THRESHOLD_MAX, days
        )));
    }
    set(conn, KEY_DAYS_THRESHOLD, &days.to_string())
}
