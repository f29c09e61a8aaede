use predicates::str::contains;
use std::fs;

mod common;
use common::{add_user, init_db_with_users, rvl, seed_visit_days_ago, setup_test_db, temp_outbox};

/// Read every mail file dropped in the outbox.
fn outbox_mails(dir: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            out.push(fs::read_to_string(e.path()).expect("read mail"));
        }
    }
    out
}

#[test]
fn test_alert_settings_defaults() {
    let db_path = setup_test_db("alert_defaults");
    init_db_with_users(&db_path);

    rvl()
        .args(["--db", &db_path, "alerts", "--show"])
        .assert()
        .success()
        .stdout(contains("enabled:        no"))
        .stdout(contains("test mode:      on"))
        .stdout(contains("days threshold: 7"));
}

#[test]
fn test_alert_settings_roundtrip() {
    let db_path = setup_test_db("alert_roundtrip");
    init_db_with_users(&db_path);

    rvl()
        .args([
            "--db", &db_path, "alerts", "--enable", "--test-mode", "off", "--threshold", "14",
        ])
        .assert()
        .success();

    rvl()
        .args(["--db", &db_path, "alerts", "--show"])
        .assert()
        .success()
        .stdout(contains("enabled:        yes"))
        .stdout(contains("test mode:      off"))
        .stdout(contains("days threshold: 14"));
}

#[test]
fn test_alert_threshold_bounds() {
    let db_path = setup_test_db("alert_threshold_bounds");
    init_db_with_users(&db_path);

    rvl()
        .args(["--db", &db_path, "alerts", "--threshold", "0"])
        .assert()
        .failure()
        .stderr(contains("between 1 and 365"));

    rvl()
        .args(["--db", &db_path, "alerts", "--threshold", "400"])
        .assert()
        .failure()
        .stderr(contains("between 1 and 365"));
}

#[test]
fn test_send_refuses_when_disabled() {
    let db_path = setup_test_db("alert_send_disabled");
    init_db_with_users(&db_path);

    rvl()
        .args(["--db", &db_path, "alerts", "--send"])
        .assert()
        .failure()
        .stderr(contains("disabled"));
}

#[test]
fn test_send_mails_inactive_users() {
    let db_path = setup_test_db("alert_send_inactive");
    let outbox = temp_outbox("alert_send_inactive");
    init_db_with_users(&db_path);

    // alice and bob went quiet; carol has no email and never visited
    seed_visit_days_ago(&db_path, "alice", 30, "/home", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    seed_visit_days_ago(&db_path, "bob", 30, "/home", "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    rvl()
        .args([
            "--db", &db_path, "alerts", "--enable", "--test-mode", "off", "--send",
            "--outbox", &outbox,
        ])
        .assert()
        .success()
        .stdout(contains("Inactivity alerts sent: 2."))
        .stdout(contains("Failed recipients: Carol King."));

    let mails = outbox_mails(&outbox);
    assert_eq!(mails.len(), 2);

    let alice_mail = mails
        .iter()
        .find(|m| m.contains("To: alice@example.org"))
        .expect("alice mail");
    assert!(alice_mail.contains("Hi Alice Cooper"));
    assert!(alice_mail.contains("for 30 days"));
    assert!(alice_mail.contains("https://portal.example.org"));
}

#[test]
fn test_send_test_mode_restricts_to_admins() {
    let db_path = setup_test_db("alert_send_test_mode");
    let outbox = temp_outbox("alert_send_test_mode");
    init_db_with_users(&db_path);

    seed_visit_days_ago(&db_path, "alice", 30, "/home", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    seed_visit_days_ago(&db_path, "bob", 30, "/home", "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    // test mode is on by default; only alice is an administrator
    rvl()
        .args([
            "--db", &db_path, "alerts", "--enable", "--send", "--outbox", &outbox,
        ])
        .assert()
        .success()
        .stdout(contains("Inactivity alerts sent: 1."))
        .stdout(contains("only administrators"));

    let mails = outbox_mails(&outbox);
    assert_eq!(mails.len(), 1);
    assert!(mails[0].contains("To: alice@example.org"));
}

#[test]
fn test_send_reports_when_nobody_is_inactive() {
    let db_path = setup_test_db("alert_send_nobody");
    let outbox = temp_outbox("alert_send_nobody");
    init_db_with_users(&db_path);

    // everyone visited today
    for login in ["alice", "bob", "carol"] {
        seed_visit_days_ago(&db_path, login, 0, "/home", "dddddddddddddddddddddddddddddddd");
    }

    rvl()
        .args([
            "--db", &db_path, "alerts", "--enable", "--test-mode", "off", "--send",
            "--outbox", &outbox,
        ])
        .assert()
        .success()
        .stdout(contains("No inactive users found"));

    assert!(outbox_mails(&outbox).is_empty());
}

#[test]
fn test_never_visited_user_gets_a_mail() {
    let db_path = setup_test_db("alert_never_visited");
    let outbox = temp_outbox("alert_never_visited");
    init_db_with_users(&db_path);
    add_user(&db_path, "dora", "Dora Gray", "dora@example.org", false);

    seed_visit_days_ago(&db_path, "alice", 0, "/home", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    seed_visit_days_ago(&db_path, "bob", 0, "/home", "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    rvl()
        .args([
            "--db", &db_path, "alerts", "--enable", "--test-mode", "off", "--send",
            "--outbox", &outbox,
        ])
        .assert()
        .success();

    let mails = outbox_mails(&outbox);
    let dora_mail = mails
        .iter()
        .find(|m| m.contains("To: dora@example.org"))
        .expect("dora mail");
    assert!(dora_mail.contains("in a while"));
}

#[test]
fn test_test_email_rejects_bad_address() {
    let db_path = setup_test_db("alert_test_email_bad");
    init_db_with_users(&db_path);

    rvl()
        .args([
            "--db", &db_path, "alerts", "--test-email", "not-an-address",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid email"));
}

#[test]
fn test_test_email_writes_outbox_file() {
    let db_path = setup_test_db("alert_test_email_ok");
    let outbox = temp_outbox("alert_test_email_ok");
    init_db_with_users(&db_path);

    rvl()
        .args([
            "--db", &db_path, "alerts", "--test-email", "ops@example.org",
            "--outbox", &outbox,
        ])
        .assert()
        .success()
        .stdout(contains("Test alert delivered to ops@example.org"));

    let mails = outbox_mails(&outbox);
    assert_eq!(mails.len(), 1);
    assert!(mails[0].contains("Subject: Inactivity alerts test"));
}
