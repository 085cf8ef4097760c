#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
#[allow(deprecated)]
fn test_outline_from_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "first\nsecond").unwrap();

    let mut cmd = Command::cargo_bin("block-tree").unwrap();
    cmd.arg("outline").arg(&input).arg("--seq-keys");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("b2 [plain-container] \"\""))
        .stdout(predicate::str::contains("  b0 [unstyled] \"first\""))
        .stdout(predicate::str::contains("  b1 [unstyled] \"second\""));
}

#[test]
#[allow(deprecated)]
fn test_text_from_stdin_with_join() {
    let mut cmd = Command::cargo_bin("block-tree").unwrap();
    cmd.arg("text").arg("--join").arg(" / ").write_stdin("a\r\nb\nc");

    cmd.assert().success().stdout("a / b / c\n");
}

#[test]
#[allow(deprecated)]
fn test_custom_delimiter() {
    let mut cmd = Command::cargo_bin("block-tree").unwrap();
    cmd.arg("text").arg("--delimiter").arg(";").write_stdin("x;y");

    cmd.assert().success().stdout("x\ny\n");
}

#[test]
#[allow(deprecated)]
fn test_json_output() {
    let mut cmd = Command::cargo_bin("block-tree").unwrap();
    cmd.arg("json").arg("--seq-keys").write_stdin("hello\nworld");

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rootBlock"]["key"], "b2");
    let children = json["rootBlock"]["children"].as_array().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["key"], "b0");
    assert_eq!(children[0]["data"]["text"], "hello");
    assert_eq!(children[1]["data"]["characterList"].as_array().unwrap().len(), 5);
    assert_eq!(json["selectionAfter"]["anchorKey"], "b0");
}

#[test]
#[allow(deprecated)]
fn test_missing_file_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("block-tree").unwrap();
    cmd.arg("outline").arg(dir.path().join("absent.txt"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}
