//! CLI argument parsing tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn vigil() -> Command {
    let mut cmd = Command::cargo_bin("vigil").unwrap();
    // Keep host configs out of the test environment.
    cmd.env("XDG_CONFIG_HOME", "/nonexistent");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    vigil()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("listen"))
        .stdout(predicate::str::contains("--pipe"));
}

#[test]
fn test_version_flag() {
    vigil()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vigil"));
}

#[test]
fn test_rejects_out_of_range_ear_threshold() {
    vigil()
        .args(["run", "--no-pipe", "--ear-threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in 0.0..=1.0"));
}

#[test]
fn test_rejects_non_numeric_threshold() {
    vigil()
        .args(["run", "--no-pipe", "--ear-threshold", "closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid number"));
}

#[test]
fn test_rejects_zero_sustain() {
    vigil()
        .args(["run", "--no-pipe", "--drowsy-sustain", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a positive duration"));
}

#[test]
fn test_mar_threshold_may_exceed_one() {
    // MAR is a ratio that can legitimately exceed 1.0 for wide-open mouths.
    vigil()
        .args(["run", "--no-pipe", "--mar-threshold", "1.2"])
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn test_listen_fails_without_pipe() {
    vigil()
        .args(["listen", "--pipe", "/nonexistent/events.pipe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"));
}
