//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("crudgate").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("crudgate").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--max-connections"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_check_rejects_malformed_url() {
    let mut cmd = Command::cargo_bin("crudgate").unwrap();
    cmd.arg("check").arg("--database-url").arg("not a url");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid database configuration"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("crudgate").unwrap();
    cmd.arg("migrate");

    cmd.assert().failure();
}
