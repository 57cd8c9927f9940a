//! Black-box tests for the CLI argument surface
//!
//! These run the compiled binary and assert on exit codes and stderr for
//! the usage-error paths. No network access happens on any path tested
//! here: a usage error must bail out before the first request.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn gh_benford() -> Command {
    Command::cargo_bin("gh-benford").unwrap()
}

#[test]
fn test_no_arguments_is_a_usage_error() {
    let workdir = tempfile::TempDir::new().unwrap();

    gh_benford()
        .current_dir(workdir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: gh-benford"));

    // A usage error must not leave report files behind
    for file_name in ["ids.html", "stars.html", "forks.html", "issues.html"] {
        assert!(!workdir.path().join(file_name).exists());
    }
}

#[test]
fn test_single_argument_is_a_usage_error() {
    let workdir = tempfile::TempDir::new().unwrap();

    gh_benford()
        .current_dir(workdir.path())
        .arg("ghp_sometoken")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: gh-benford"));

    for file_name in ["ids.html", "stars.html", "forks.html", "issues.html"] {
        assert!(!workdir.path().join(file_name).exists());
    }
}

#[test]
fn test_help_exits_zero() {
    gh_benford()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Benford"));
}
