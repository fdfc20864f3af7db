//! End-to-end tests for `gridplan export` command.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

/// Path to the gridplan binary
fn gridplan_bin() -> &'static str {
    env!("CARGO_BIN_EXE_gridplan")
}

#[test]
fn test_export_input_to_stdout() {
    let plan = test_plan_basic();
    let (plan_path, _temp_dir) = create_temp_plan_file(&plan);

    let output = Command::new(gridplan_bin())
        .args(["export", "--input", plan_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let exported = gridplan::parser::decode(&stdout).expect("Should be a valid envelope");
    assert_eq!(exported, plan);
}

#[test]
fn test_export_to_file_is_pretty_envelope() {
    let plan = test_plan_basic();
    let (plan_path, temp_dir) = create_temp_plan_file(&plan);
    let output_path = temp_dir.path().join("out").join("export.json");

    let output = Command::new(gridplan_bin())
        .args([
            "export",
            "--input",
            plan_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Exported plan to"));

    let text = fs::read_to_string(&output_path).expect("Export file should exist");
    assert!(text.contains('\n'), "Export should be pretty-printed");

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["rooms"]["1"].as_array().unwrap().len(), 2);
    assert_eq!(value["doors"]["2"][0]["orient"], "v");
    assert_eq!(value["doors"]["2"][0]["type"], "sliding");
}

#[test]
fn test_export_empty_autosave_slot() {
    let slot_dir = TempDir::new().unwrap();

    let output = Command::new(gridplan_bin())
        .args([
            "--autosave-dir",
            slot_dir.path().to_str().unwrap(),
            "export",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should print an envelope");
    assert_eq!(value["version"], 1);
    assert!(value["rooms"]["1"].as_array().unwrap().is_empty());
    assert!(value["doors"]["2"].as_array().unwrap().is_empty());
}

#[test]
fn test_export_missing_input_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.json");

    let output = Command::new(gridplan_bin())
        .args(["export", "--input", missing.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.json"));
}

#[test]
fn test_export_rejects_wrong_version() {
    let (plan_path, _temp_dir) = create_temp_text_file(
        r#"{"version": 2, "rooms": {"1": [], "2": []}, "doors": {"1": [], "2": []}}"#,
    );

    let output = Command::new(gridplan_bin())
        .args(["export", "--input", plan_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported version"));
}
