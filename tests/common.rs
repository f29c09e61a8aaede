#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Duration, Utc};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rvl() -> Command {
    cargo_bin_cmd!("rvisitlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rvisitlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create a unique, empty outbox directory inside tempdir
pub fn temp_outbox(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_outbox", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_dir_all(&p).ok();
    p
}

/// Initialize the schema (uses --test init so no config file is written)
pub fn init_db(db_path: &str) {
    rvl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn add_user(db_path: &str, login: &str, name: &str, email: &str, admin: bool) {
    let mut args = vec![
        "--db", db_path, "user", "add", login, "--name", name, "--email", email,
    ];
    if admin {
        args.push("--admin");
    }
    rvl().args(&args).assert().success();
}

/// Initialize DB and add the small directory most tests share:
/// alice (administrator), bob, plus carol without an email address.
pub fn init_db_with_users(db_path: &str) {
    init_db(db_path);
    add_user(db_path, "alice", "Alice Cooper", "alice@example.org", true);
    add_user(db_path, "bob", "Bob Dylan", "bob@example.org", false);
    add_user(db_path, "carol", "Carol King", "", false);
}

/// Record one visit through the CLI (the recorder assigns the timestamp)
pub fn record_visit(db_path: &str, login: &str, url: &str) {
    rvl()
        .args(["--db", db_path, "record", "--user", login, "--url", url])
        .assert()
        .success();
}

/// Insert a backdated visit directly via the library API, the recorder
/// never backdates
pub fn seed_visit_days_ago(db_path: &str, login: &str, days_ago: i64, url: &str, session: &str) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let user_id: i64 = conn
        .query_row("SELECT id FROM users WHERE login = ?1", [login], |row| {
            row.get(0)
        })
        .expect("user id");

    let ts = (Utc::now() - Duration::days(days_ago))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    rvisitlog::db::queries::insert_visit(&conn, user_id, &ts, url, "", session)
        .expect("insert visit");
}

/// Like `seed_visit_days_ago` but with minute granularity, for tests that
/// sit on either side of the session idle window.
pub fn seed_visit_minutes_ago(
    db_path: &str,
    login: &str,
    minutes_ago: i64,
    url: &str,
    session: &str,
) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let user_id: i64 = conn
        .query_row("SELECT id FROM users WHERE login = ?1", [login], |row| {
            row.get(0)
        })
        .expect("user id");

    let ts = (Utc::now() - Duration::minutes(minutes_ago))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    rvisitlog::db::queries::insert_visit(&conn, user_id, &ts, url, "", session)
        .expect("insert visit");
}

/// Newest session token stored for a login
pub fn last_session_token(db_path: &str, login: &str) -> String {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT v.session_id FROM visits v
         JOIN users u ON u.id = v.user_id
         WHERE u.login = ?1
         ORDER BY v.id DESC LIMIT 1",
        [login],
        |row| row.get(0),
    )
    .expect("session token")
}

/// Number of distinct sessions stored for a login
pub fn session_count(db_path: &str, login: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT COUNT(DISTINCT v.session_id) FROM visits v
         JOIN users u ON u.id = v.user_id
         WHERE u.login = ?1",
        [login],
        |row| row.get(0),
    )
    .expect("session count")
}
