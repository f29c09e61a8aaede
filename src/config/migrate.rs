//! Config file repair: detect and fill keys missing from older installs.
//!
//! A config written by an earlier release may lack keys added later (the
//! mail settings arrived with the alert engine). `config --check` reports
//! them, `config --migrate` fills them with defaults, ledgered in the `log`
//! table so the repair runs once.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension, params};
use serde_yaml::Value;
use std::fs;

const VERSION: &str = "20250705_0004_fill_missing_config_keys";

/// Every key a current config file must carry, with its default value.
/// `database` is excluded: a file without it is not a config at all.
fn expected_entries() -> Vec<(&'static str, Value)> {
    vec![
        ("session_idle_minutes", Value::Number(60.into())),
        (
            "portal_url",
            Value::String("https://portal.example.org".into()),
        ),
        (
            "mail_from",
            Value::String("alerts@portal.example.org".into()),
        ),
        (
            "outbox",
            Value::String(
                super::Config::config_dir()
                    .join("outbox")
                    .to_string_lossy()
                    .to_string(),
            ),
        ),
        ("date_format", Value::String("%Y-%m-%d %H:%M".into())),
    ]
}

/// Keys from `expected_entries` absent from the config file on disk.
/// A missing file reports every key as missing.
pub fn missing_keys() -> AppResult<Vec<String>> {
    let conf_file = super::Config::config_file();

    if !conf_file.exists() {
        return Ok(expected_entries()
            .iter()
            .map(|(k, _)| k.to_string())
            .collect());
    }

    let content = fs::read_to_string(&conf_file)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("cannot parse {:?}: {}", conf_file, e)))?;

    let map = match yaml.as_mapping() {
        Some(m) => m,
        None => {
            return Err(AppError::Config(format!(
                "{:?} is not a YAML mapping",
                conf_file
            )));
        }
    };

    let mut missing = Vec::new();
    for (key, _) in expected_entries() {
        if !map.contains_key(Value::String(key.to_string())) {
            missing.push(key.to_string());
        }
    }
    Ok(missing)
}

/// Migration that adds any missing keys to the YAML config with their
/// defaults, and marks itself as applied in the `log` table.
pub fn fill_missing_config_keys(conn: &Connection) -> Result<(), Error> {
    // Check if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    if chk.query_row([VERSION], |_| Ok(())).optional()?.is_some() {
        return Ok(()); // already applied
    }

    let conf_file = super::Config::config_file();
    let mut added: Vec<&str> = Vec::new();

    if conf_file.exists() {
        let content = fs::read_to_string(&conf_file).map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to read config {:?}: {}", conf_file, e)),
            )
        })?;

        if let Ok(mut yaml) = serde_yaml::from_str::<Value>(&content)
            && let Some(map) = yaml.as_mapping_mut()
        {
            for (key, default) in expected_entries() {
                let k = Value::String(key.to_string());
                if !map.contains_key(&k) {
                    map.insert(k, default);
                    added.push(key);
                }
            }

            if !added.is_empty() {
                let serialized = serde_yaml::to_string(&yaml).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to serialize updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;

                // Inject documentation comment right after the idle-window line
                let mut new_content = String::new();
                for line in serialized.lines() {
                    new_content.push_str(line);
                    new_content.push('\n');

                    if line.starts_with("session_idle_minutes:") {
                        new_content.push_str(
                            "# session-idle-minutes: a session token presented after this many\n\
                             # idle minutes is rotated; every recorded visit refreshes the window\n",
                        );
                    }
                }

                fs::write(&conf_file, new_content).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to write updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;
            }
        }
    }

    // Same RFC 3339 stamp ttlog uses
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![
            chrono::Local::now().to_rfc3339(),
            VERSION,
            format!("Filled missing config keys: {}", added.join(", ")),
        ],
    )?;

    if added.is_empty() {
        success(format!(
            "Migration applied: {} — config already complete.",
            VERSION
        ));
    } else {
        success(format!(
            "Migration applied: {} — added missing config keys: {}.",
            VERSION,
            added.join(", ")
        ));
    }

    Ok(())
}
