use chrono::{Duration, Local};
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_users, record_visit, rvl, seed_visit_days_ago, setup_test_db, temp_out};

#[test]
fn test_export_visits_csv_all() {
    let db_path = setup_test_db("export_visits_csv_all");
    init_db_with_users(&db_path);
    record_visit(&db_path, "alice", "/home");
    record_visit(&db_path, "bob", "/news");

    let out = temp_out("export_visits_csv_all", "csv");

    rvl()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("page_url"));
    assert!(content.contains("/home"));
    assert!(content.contains("/news"));
    assert!(content.contains("alice"));
}

#[test]
fn test_export_visits_json_contains_logins() {
    let db_path = setup_test_db("export_visits_json");
    init_db_with_users(&db_path);
    record_visit(&db_path, "alice", "/home");

    let out = temp_out("export_visits_json", "json");

    rvl()
        .args(["--db", &db_path, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("\"user\": \"alice\""));
    assert!(content.contains("\"page_url\": \"/home\""));
}

#[test]
fn test_export_visits_txt_renders_table() {
    let db_path = setup_test_db("export_visits_txt");
    init_db_with_users(&db_path);
    record_visit(&db_path, "alice", "/members/profile");

    let out = temp_out("export_visits_txt", "txt");

    rvl()
        .args(["--db", &db_path, "export", "--format", "txt", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported txt");
    assert!(content.contains("Page URL"));
    assert!(content.contains("/members/profile"));
    assert!(content.contains("alice"));
}

#[test]
fn test_export_days_window_filters_old_visits() {
    let db_path = setup_test_db("export_days_window");
    init_db_with_users(&db_path);

    seed_visit_days_ago(&db_path, "alice", 1, "/fresh", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    seed_visit_days_ago(&db_path, "bob", 40, "/stale", "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    let out = temp_out("export_days_window", "csv");

    rvl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--days", "7",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("/fresh"));
    assert!(!content.contains("/stale"));
}

#[test]
fn test_export_range_filters_by_calendar_days() {
    let db_path = setup_test_db("export_range");
    init_db_with_users(&db_path);

    seed_visit_days_ago(&db_path, "alice", 1, "/fresh", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    seed_visit_days_ago(&db_path, "bob", 40, "/stale", "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    let today = Local::now().date_naive();
    let range = format!(
        "{}:{}",
        (today - Duration::days(3)).format("%Y-%m-%d"),
        today.format("%Y-%m-%d")
    );

    let out = temp_out("export_range", "csv");

    rvl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", &range,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("/fresh"));
    assert!(!content.contains("/stale"));
}

#[test]
fn test_export_activity_summary() {
    let db_path = setup_test_db("export_activity");
    init_db_with_users(&db_path);

    seed_visit_days_ago(&db_path, "alice", 1, "/home", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    seed_visit_days_ago(&db_path, "alice", 1, "/news", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

    let out = temp_out("export_activity", "csv");

    rvl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--activity",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("sessions"));
    assert!(content.contains("Alice Cooper"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_users(&db_path);
    record_visit(&db_path, "alice", "/home");

    rvl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("absolute"));
}

#[test]
fn test_export_days_and_range_conflict() {
    let db_path = setup_test_db("export_conflict");
    init_db_with_users(&db_path);
    record_visit(&db_path, "alice", "/home");

    let out = temp_out("export_conflict", "csv");

    rvl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--days", "7",
            "--range", "2025-06",
        ])
        .assert()
        .failure()
        .stderr(contains("mutually exclusive"));
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let db_path = setup_test_db("export_overwrite");
    init_db_with_users(&db_path);
    record_visit(&db_path, "alice", "/home");

    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "sentinel").expect("precreate output");

    rvl()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));

    assert_eq!(fs::read_to_string(&out).expect("read"), "sentinel");

    rvl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();

    assert!(fs::read_to_string(&out).expect("read").contains("/home"));
}
