//! CLI surface tests
//!
//! Runs the built binary to verify argument parsing and help output.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("solace")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("solace")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("solace"));
}

#[test]
fn test_unknown_subcommand_fails() {
    Command::cargo_bin("solace")
        .unwrap()
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_chat_rejects_unknown_flag() {
    Command::cargo_bin("solace")
        .unwrap()
        .args(["chat", "--stream"])
        .assert()
        .failure();
}

#[test]
fn test_check_fails_against_unreachable_backend() {
    // Connection refused immediately; the fixture disables retries and delay
    Command::cargo_bin("solace")
        .unwrap()
        .args(["--config", "tests/fixtures/check_fast.yaml", "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unavailable"));
}
