#![allow(deprecated)] // TODO: migrate Command::cargo_bin to the cargo_bin! macro

use assert_cmd::Command;
use predicates::prelude::*;

/// --help prints the tool summary.
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("snapflow").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hetzner"))
        .stdout(predicate::str::contains("interactive menu"));
}

/// --version prints the crate version.
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("snapflow").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("snapflow"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Unknown arguments are rejected.
#[test]
fn test_unknown_argument_fails() {
    let mut cmd = Command::cargo_bin("snapflow").unwrap();
    cmd.arg("--bogus").assert().failure();
}

/// Without any token source the process exits non-zero before the menu.
/// On macOS a host Keychain entry could satisfy the lookup, so the test
/// only runs where the environment is the sole token source.
#[cfg(not(target_os = "macos"))]
#[test]
fn test_missing_token_is_fatal() {
    let mut cmd = Command::cargo_bin("snapflow").unwrap();
    cmd.env_remove("HETZNER_API_TOKEN")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HETZNER_API_TOKEN"));
}

/// A garbage poll interval is a startup error, not a hang.
#[test]
fn test_invalid_poll_interval_is_fatal() {
    let mut cmd = Command::cargo_bin("snapflow").unwrap();
    cmd.env("HETZNER_API_TOKEN", "test-token")
        .env("SNAPFLOW_POLL_INTERVAL_SECS", "soon")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SNAPFLOW_POLL_INTERVAL_SECS"));
}
