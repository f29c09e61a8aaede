use predicates::str::contains;

mod common;
use common::{
    add_user, init_db, init_db_with_users, last_session_token, record_visit, rvl,
    seed_visit_minutes_ago, session_count, setup_test_db,
};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_schema");
    init_db(&db_path);

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .expect("prepare");
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("collect");

    for expected in ["log", "settings", "users", "visits"] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {expected}, got {tables:?}"
        );
    }
}

#[test]
fn test_record_unknown_user_fails() {
    let db_path = setup_test_db("record_unknown");
    init_db(&db_path);

    rvl()
        .args(["--db", &db_path, "record", "--user", "ghost", "--url", "/home"])
        .assert()
        .failure()
        .stderr(contains("Unknown user"));
}

#[test]
fn test_record_mints_new_session() {
    let db_path = setup_test_db("record_new_session");
    init_db_with_users(&db_path);

    rvl()
        .args(["--db", &db_path, "record", "--user", "alice", "--url", "/home"])
        .assert()
        .success()
        .stdout(contains("new session"))
        .stdout(contains("Session token:"));

    let token = last_session_token(&db_path, "alice");
    assert_eq!(token.len(), 32);
    assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));
}

#[test]
fn test_record_resumes_session_within_idle_window() {
    let db_path = setup_test_db("record_resume");
    init_db_with_users(&db_path);

    record_visit(&db_path, "alice", "/home");
    let token = last_session_token(&db_path, "alice");

    rvl()
        .args([
            "--db", &db_path, "record", "--user", "alice", "--url", "/news",
            "--session", &token,
        ])
        .assert()
        .success()
        .stdout(contains("session resumed"));

    assert_eq!(last_session_token(&db_path, "alice"), token);
    assert_eq!(session_count(&db_path, "alice"), 1);
}

#[test]
fn test_record_rotates_expired_token() {
    let db_path = setup_test_db("record_expired");
    init_db_with_users(&db_path);

    // Last visit on this token is past the 60-minute idle window
    let stale = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    seed_visit_minutes_ago(&db_path, "alice", 90, "/home", stale);

    rvl()
        .args([
            "--db", &db_path, "record", "--user", "alice", "--url", "/news",
            "--session", stale,
        ])
        .assert()
        .success()
        .stdout(contains("new session"));

    assert_ne!(last_session_token(&db_path, "alice"), stale);
    assert_eq!(session_count(&db_path, "alice"), 2);
}

#[test]
fn test_record_resumes_token_inside_idle_window() {
    let db_path = setup_test_db("record_inside_window");
    init_db_with_users(&db_path);

    let token = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
    seed_visit_minutes_ago(&db_path, "alice", 30, "/home", token);

    rvl()
        .args([
            "--db", &db_path, "record", "--user", "alice", "--url", "/news",
            "--session", token,
        ])
        .assert()
        .success()
        .stdout(contains("session resumed"));

    assert_eq!(last_session_token(&db_path, "alice"), token);
    assert_eq!(session_count(&db_path, "alice"), 1);
}

#[test]
fn test_record_rotates_malformed_token() {
    let db_path = setup_test_db("record_malformed");
    init_db_with_users(&db_path);

    rvl()
        .args([
            "--db", &db_path, "record", "--user", "alice", "--url", "/home",
            "--session", "not-a-real-token",
        ])
        .assert()
        .success()
        .stdout(contains("new session"));
}

#[test]
fn test_record_rotates_unknown_token() {
    let db_path = setup_test_db("record_unknown_token");
    init_db_with_users(&db_path);

    // Well-formed 32-hex, but never minted by the engine
    let foreign = "deadbeefdeadbeefdeadbeefdeadbeef";

    rvl()
        .args([
            "--db", &db_path, "record", "--user", "alice", "--url", "/home",
            "--session", foreign,
        ])
        .assert()
        .success()
        .stdout(contains("new session"));

    assert_ne!(last_session_token(&db_path, "alice"), foreign);
}

#[test]
fn test_record_rejects_overlong_url() {
    let db_path = setup_test_db("record_long_url");
    init_db_with_users(&db_path);

    let long_url = format!("/p/{}", "x".repeat(300));

    rvl()
        .args(["--db", &db_path, "record", "--user", "alice", "--url", &long_url])
        .assert()
        .failure()
        .stderr(contains("Invalid page URL"));
}

#[test]
fn test_user_add_duplicate_fails() {
    let db_path = setup_test_db("user_duplicate");
    init_db(&db_path);
    add_user(&db_path, "alice", "Alice Cooper", "alice@example.org", false);

    rvl()
        .args([
            "--db", &db_path, "user", "add", "alice", "--name", "Alice Again",
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_user_add_rejects_bad_email() {
    let db_path = setup_test_db("user_bad_email");
    init_db(&db_path);

    rvl()
        .args([
            "--db", &db_path, "user", "add", "dora", "--name", "Dora", "--email",
            "not-an-address",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid email"));
}

#[test]
fn test_user_list_shows_directory() {
    let db_path = setup_test_db("user_list");
    init_db_with_users(&db_path);

    rvl()
        .args(["--db", &db_path, "user", "list"])
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("Bob Dylan"))
        .stdout(contains("3 user(s)"));
}

#[test]
fn test_db_info_reports_totals() {
    let db_path = setup_test_db("db_info");
    init_db_with_users(&db_path);
    record_visit(&db_path, "alice", "/home");

    rvl()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total visits"))
        .stdout(contains("Distinct sessions"));
}

#[test]
fn test_db_check_passes_on_fresh_db() {
    let db_path = setup_test_db("db_check");
    init_db(&db_path);

    rvl()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_log_dates_share_one_format_across_writers() {
    let db_path = setup_test_db("log_date_format");

    // 1.0-era schema: users without the alert columns, so init runs the
    // ledgered upgrade and writes a migration_applied row.
    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    conn.execute_batch(
        "CREATE TABLE users (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            login        TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL DEFAULT ''
        );",
    )
    .expect("legacy schema");
    drop(conn);

    init_db(&db_path);

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let mut stmt = conn
        .prepare("SELECT operation, date FROM log")
        .expect("prepare");
    let rows: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("collect");

    assert!(
        rows.iter().any(|(op, _)| op == "migration_applied"),
        "upgrade left no ledger row, got {rows:?}"
    );
    for (op, date) in &rows {
        assert!(
            chrono::DateTime::parse_from_rfc3339(date).is_ok(),
            "{op} row carries a non-RFC 3339 date: {date}"
        );
    }
}

#[test]
fn test_log_print_traces_operations() {
    let db_path = setup_test_db("log_print");
    init_db_with_users(&db_path);
    record_visit(&db_path, "alice", "/home");

    rvl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("user_added"))
        .stdout(contains("visit_recorded"));
}
