// tests/e2e_cli_tests.rs
//! End-to-end tests that spawn the real binary: argument parsing, the
//! feedback path, and the admin gate. Nothing here touches the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hardness() -> Command {
    let mut cmd = Command::cargo_bin("hardness").expect("binary built");
    cmd.env_remove("ADMIN_PASSWORD");
    cmd.env_remove("AUTH_TOKEN");
    cmd.env_remove("HARDNESS_FEEDBACK_FILE");
    cmd
}

#[test]
fn stages_lists_the_full_chain_in_order() {
    hardness()
        .arg("stages")
        .assert()
        .success()
        .stdout(predicate::str::contains("vocabulary"))
        .stdout(predicate::str::contains("current_system"))
        .stdout(predicate::str::contains("Q12"))
        .stdout(predicate::str::contains("hardness_summary"));
}

#[test]
fn feedback_appends_to_the_configured_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("feedback.csv");

    hardness()
        .env("HARDNESS_FEEDBACK_FILE", &path)
        .args([
            "feedback",
            "--employee-id",
            "E42",
            "--name",
            "Priya",
            "--email",
            "priya@example.com",
            "--feedback-type",
            "positive",
            "--comment",
            "definitions were spot on",
            "--account",
            "Walmart",
            "--industry",
            "Retail",
            "--agent",
            "vocabulary",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feedback recorded"));

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("Timestamp,"));
    assert!(contents.contains("definitions were spot on"));
    assert!(contents.contains("Walmart"));
}

#[test]
fn feedback_rejects_an_unknown_type() {
    hardness()
        .args([
            "feedback",
            "--employee-id",
            "E42",
            "--name",
            "Priya",
            "--email",
            "priya@example.com",
            "--feedback-type",
            "rant",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("feedback-type"));
}

#[test]
fn admin_requires_the_password_environment() {
    hardness()
        .args(["admin", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ADMIN_PASSWORD"));
}

#[test]
fn analyze_needs_a_problem_statement() {
    hardness()
        .args(["analyze", "--account", "Walmart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--problem"));
}

#[test]
fn analyze_rejects_an_unknown_account() {
    hardness()
        .args([
            "analyze",
            "--account",
            "No Such Account",
            "--problem",
            "anything",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown account"));
}

#[test]
fn unmapped_account_requires_an_industry() {
    hardness()
        .args(["analyze", "--account", "Others", "--problem", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--industry"));
}

#[test]
fn single_stage_rejects_an_unknown_name() {
    hardness()
        .args(["stage", "Q99", "--problem", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Q99"));
}
