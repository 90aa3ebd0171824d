//! CLI Integration Tests for plsa
//!
//! Runs the actual binary against temporary dataset files.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin still works, just deprecated for custom build-dir

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn plsa() -> Command {
    Command::cargo_bin("plsa").expect("Failed to find plsa binary")
}

fn create_dataset(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{line}").expect("Failed to write line");
    }
    file
}

fn scenario() -> NamedTempFile {
    create_dataset(&["0:2.0 1:1.0", "1:1.0 2:3.0"])
}

#[test]
fn test_help() {
    plsa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_train_prints_each_iteration() {
    let file = scenario();
    plsa()
        .args(["train", "-k", "2", "-n", "3", "--seed", "1"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("likelihood: "))
        .stdout(predicate::str::contains("[2]"))
        .stdout(predicate::str::contains("Topics"));
}

#[test]
fn test_train_json_lines() {
    let file = scenario();
    let output = plsa()
        .args(["train", "-k", "2", "-n", "4", "--json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 5);
    for (i, record) in lines[..4].iter().enumerate() {
        assert_eq!(record["iteration"], i);
    }
    assert_eq!(lines[4]["iterations_completed"], 4);
    assert_eq!(lines[4]["topics"].as_array().unwrap().len(), 2);
}

#[test]
fn test_train_missing_file() {
    plsa()
        .args(["train", "/nonexistent/corpus.svm"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_train_zero_topics() {
    let file = scenario();
    plsa()
        .args(["train", "-k", "0"])
        .arg(file.path())
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("n_topics"));
}

#[test]
fn test_train_malformed_dataset() {
    let file = create_dataset(&["0:1.0 nonsense"]);
    plsa()
        .args(["train"])
        .arg(file.path())
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_train_with_config_file() {
    let file = scenario();
    let mut config = NamedTempFile::new().unwrap();
    write!(config, r#"{{"n_topics": 3, "n_iterations": 2}}"#).unwrap();

    let output = plsa()
        .args(["train", "--json", "--config"])
        .arg(config.path())
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let summary: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(summary["config"]["n_topics"], 3);
    assert_eq!(summary["iterations_completed"], 2);
}

#[test]
fn test_train_flag_overrides_config_file() {
    let file = scenario();
    let mut config = NamedTempFile::new().unwrap();
    write!(config, r#"{{"n_topics": 0, "n_iterations": 2}}"#).unwrap();

    let output = plsa()
        .args(["train", "--json", "-k", "3", "--config"])
        .arg(config.path())
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let summary: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(summary["config"]["n_topics"], 3);
    assert_eq!(summary["iterations_completed"], 2);
}

#[test]
fn test_train_oversized_dimension() {
    let file = create_dataset(&["0:1.0 18446744073709551615:1.0"]);
    plsa()
        .args(["train"])
        .arg(file.path())
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("exceeds maximum"));
}

#[test]
fn test_inspect_json() {
    let file = create_dataset(&["0:2.0 1:1.0", "", "1:1.0 4:3.0"]);
    let output = plsa()
        .args(["inspect", "--json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["documents"], 3);
    assert_eq!(summary["vocab_size"], 5);
    assert_eq!(summary["occurrences"], 4);
    assert_eq!(summary["empty_documents"], 1);
    assert_eq!(summary["unused_dimensions"], 2);
}
