//! Smoke tests for the scicalc CLI

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the scicalc binary
fn scicalc() -> Command {
    Command::cargo_bin("scicalc").expect("scicalc binary should exist")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    scicalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    scicalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("keys"));
}

#[test]
fn test_no_args_fails() {
    scicalc().assert().failure();
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_arithmetic() {
    scicalc()
        .args(["run", "2", "PLUS", "2", "EQUALS"])
        .assert()
        .success()
        .stdout("2+2\n4\n");
}

#[test]
fn test_run_memory_json() {
    scicalc()
        .args(["run", "--format", "json", "2", "PLUS", "2", "M+"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""result":"M = 4""#))
        .stdout(predicate::str::contains(r#""memory":4.0"#));
}

#[test]
fn test_run_trace() {
    scicalc()
        .args(["run", "--trace", "SHIFT", "SIN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SHIFT"))
        .stdout(predicate::str::contains("asin("));
}

#[test]
fn test_run_quadratic() {
    scicalc()
        .args([
            "run", "MODE", "MODE", "MODE", "EQUALS", "1", "EQUALS", "1", "EQUALS", "0", "EQUALS",
            "1", "EQUALS",
        ])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("X1=0.0000 + 1.0000i\n"));
}

#[test]
fn test_run_syntax_error_still_succeeds() {
    scicalc()
        .args(["run", "PLUS", "EQUALS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Syntax Error"));
}

#[test]
fn test_run_without_engine() {
    scicalc()
        .args(["--no-engine", "run", "1", "EQUALS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Math lib missing"));
}

#[test]
fn test_run_requires_keys() {
    scicalc().arg("run").assert().failure();
}

// ============================================================================
// repl / keys / config
// ============================================================================

#[test]
fn test_repl_reads_stdin() {
    scicalc()
        .arg("repl")
        .write_stdin("3 MULTIPLY 3 EQUALS\nAC ANS PLUS 1 EQUALS\n")
        .assert()
        .success()
        .stdout("3*3\n9\nAns+1\n10\n");
}

#[test]
fn test_keys_lists_vocabulary() {
    scicalc()
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("EQUALS"))
        .stdout(predicate::str::contains("SHIFT"))
        .stdout(predicate::str::contains("ENG"));
}

#[test]
fn test_config_defaults() {
    scicalc()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("precision: 10"))
        .stdout(predicate::str::contains("root_decimals: 4"));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calc.yaml");
    fs::write(&path, "calculator:\n  precision: 3\n").unwrap();

    scicalc()
        .arg("--config")
        .arg(&path)
        .args(["run", "2", "DIVIDE", "3", "EQUALS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.667"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    scicalc()
        .arg("--config")
        .arg(dir.path().join("nope.yaml"))
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Configuration error"));
}
