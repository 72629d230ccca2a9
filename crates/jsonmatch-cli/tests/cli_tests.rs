//! Integration tests for the `jsonmatch` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the `diff` subcommand
//! through the actual binary: stdin and file input, both output formats, and
//! the exit status contract (0 match, 1 diffs, 2 errors).

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn jsonmatch() -> Command {
    Command::cargo_bin("jsonmatch").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Matching payloads
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn matching_file_exits_zero_with_no_output() {
    jsonmatch()
        .args(["diff", "--expected", &fixture("user_expected.json")])
        .args(["-i", &fixture("user_match.json")])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn matching_stdin_exits_zero() {
    jsonmatch()
        .args(["diff", "--expected", &fixture("user_expected.json")])
        .write_stdin(r#"{"id":23,"name":"Alice","roles":["admin","ops"],"profile":{"city":"Berlin","verified":true}}"#)
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────────────────
// Mismatching payloads
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn mismatch_prints_one_line_per_diff_in_walk_order() {
    let output = jsonmatch()
        .args(["diff", "--expected", &fixture("user_expected.json")])
        .args(["-i", &fixture("user_mismatch.json")])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            r#"value mismatch at "/name": expected "Alice", actual "Alicia""#,
            r#"value mismatch at "/roles/1": expected "ops", actual <missing>"#,
            r#"type mismatch at "/profile/verified": expected true, actual "yes""#,
            r#"value mismatch at "/extra": expected <missing>, actual null"#,
        ]
    );
}

#[test]
fn json_format_emits_diff_objects() {
    let output = jsonmatch()
        .args(["diff", "--expected", &fixture("user_expected.json")])
        .args(["-i", &fixture("user_mismatch.json"), "--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let diffs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let diffs = diffs.as_array().expect("output must be a JSON array");
    assert_eq!(diffs.len(), 4);
    assert_eq!(diffs[0]["kind"], "value mismatch");
    assert_eq!(diffs[0]["pointer"], "/name");
    assert_eq!(diffs[2]["kind"], "type mismatch");
    assert_eq!(diffs[3]["expected_json"], "<missing>");
}

#[test]
fn invalid_payload_is_reported_as_unmarshal_error() {
    jsonmatch()
        .args(["diff", "--expected", &fixture("user_expected.json")])
        .write_stdin("Not found\n")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("unmarshal error ("))
        .stdout(predicate::str::contains(r#"at "":"#));
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_expectation_file_exits_two() {
    jsonmatch()
        .args(["diff", "--expected", "/nonexistent/expected.json"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn missing_payload_file_exits_two() {
    jsonmatch()
        .args(["diff", "--expected", &fixture("user_match.json")])
        .args(["-i", "/nonexistent/actual.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read file: /nonexistent/actual.json"));
}

#[test]
fn malformed_expectation_exits_two() {
    let path = std::env::temp_dir().join("jsonmatch-cli-malformed-expected.json");
    std::fs::write(&path, "{not json").unwrap();

    jsonmatch()
        .args(["diff", "--expected", path.to_str().unwrap()])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Expectation is not valid JSON"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_subcommand_fails() {
    jsonmatch().assert().failure();
}
