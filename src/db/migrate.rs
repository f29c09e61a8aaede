use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result, params};

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

/// Check if the `users` table exists.
fn users_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='users'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `users` table has an `email` column.
/// The 1.0 schema predates the alert engine and carries neither
/// `email` nor `is_admin`.
fn users_has_email_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('users')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "email" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `users` table with the modern schema (including alert columns).
fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            login        TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL DEFAULT '',
            email        TEXT NOT NULL DEFAULT '',
            is_admin     INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )?;
    Ok(())
}

/// Create the `visits` table. Append-only: no UPDATE or DELETE path exists
/// anywhere in the tool, rows are immutable once written.
fn create_visits_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS visits (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL,
            visited_at TEXT NOT NULL,
            page_url   TEXT NOT NULL,
            page_title TEXT NOT NULL DEFAULT '',
            session_id TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_visits_user_time ON visits(user_id, visited_at);
        CREATE INDEX IF NOT EXISTS idx_visits_session_time ON visits(session_id, visited_at);
        CREATE INDEX IF NOT EXISTS idx_visits_time ON visits(visited_at);
        "#,
    )?;
    Ok(())
}

/// Create the `settings` table and seed the alert defaults.
/// Alerts ship disabled and in test mode so enabling them can never
/// surprise a fresh install with real mail.
fn ensure_settings_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        INSERT OR IGNORE INTO settings (key, value) VALUES ('alerts_enabled', '0');
        INSERT OR IGNORE INTO settings (key, value) VALUES ('alerts_test_mode', '1');
        INSERT OR IGNORE INTO settings (key, value) VALUES ('alerts_days_threshold', '7');
        "#,
    )?;
    Ok(())
}

fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_110.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = match std::path::Path::new(db_path).parent() {
        Some(dir) => dir.join(&backup_name),
        None => std::path::PathBuf::from(&backup_name),
    };

    let file = File::create(&backup_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
            e.kind(),
            format!("Backup failed (create): {}", e),
        )))
    })?;

    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (start_file): {}",
            e
        ))))
    })?;

    let db_content = fs::read(db_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (read): {}",
            e
        ))))
    })?;

    zip.write_all(&db_content).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (write_all): {}",
            e
        ))))
    })?;

    zip.finish().map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (finish): {}",
            e
        ))))
    })?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Migrate a 1.0 `users` table to the alert-aware schema.
fn migrate_add_alert_columns(conn: &Connection) -> Result<(), Error> {
    let version = "20250420_0003_add_alert_columns";

    // 1) Skip if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    // 2) Run the migration
    conn.execute_batch(
        r#"
        ALTER TABLE users ADD COLUMN email TEXT NOT NULL DEFAULT '';
        ALTER TABLE users ADD COLUMN is_admin INTEGER NOT NULL DEFAULT 0;
        "#,
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to add alert columns: {}", e)),
        )
    })?;

    // 3) Mark as applied. Same RFC 3339 stamp ttlog uses, so every
    // row in the log table shares one date format.
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, 'Added email and is_admin to users')",
        params![chrono::Local::now().to_rfc3339(), version],
    )?;

    success(format!(
        "Migration applied: {} → added 'email' and 'is_admin' to users table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Inspect the users table
    let users_exists = users_table_exists(conn)?;
    let users_has_email = if users_exists {
        users_has_email_column(conn)?
    } else {
        false
    };

    // 3) Legacy 1.0 schema → perform PRE-MIGRATION BACKUP
    if users_exists && !users_has_email {
        warning("Legacy schema detected — creating safety backup before migration...");

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if !db_path.is_empty() {
            backup_before_migration(&db_path)?;
        } else {
            warning("Could not determine DB path — backup skipped.");
        }
    }

    // 4) Create or upgrade users
    if !users_exists {
        create_users_table(conn)?;
    } else if !users_has_email {
        migrate_add_alert_columns(conn)?;
    }

    // 5) Visits table and its indexes are idempotent
    create_visits_table(conn)?;

    // 6) Settings with seeded alert defaults
    ensure_settings_table(conn)?;

    Ok(())
}
