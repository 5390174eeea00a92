//! Flag parsing smoke tests for the reposync binary.

use assert_cmd::Command;
use predicates::prelude::predicate;

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("reposync")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sync a local folder"))
        .stdout(predicate::str::contains("--archive-dir"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn missing_required_flags_fail() {
    Command::cargo_bin("reposync")
        .expect("binary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--user"))
        .stderr(predicate::str::contains("--token"));
}

#[test]
fn dir_flags_are_required() {
    Command::cargo_bin("reposync")
        .expect("binary")
        .args(["--user", "octocat", "--token", "t"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dir"))
        .stderr(predicate::str::contains("--archive-dir"));
}
