//! End-to-end tests for `gridplan validate` command.

use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the gridplan binary
fn gridplan_bin() -> &'static str {
    env!("CARGO_BIN_EXE_gridplan")
}

#[test]
fn test_validate_valid_plan() {
    let (plan_path, _temp_dir) = create_temp_plan_file(&test_plan_basic());

    let output = Command::new(gridplan_bin())
        .args(["validate", plan_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Valid plan should exit with code 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("✓ Validation passed"));
}

#[test]
fn test_validate_valid_plan_json() {
    let (plan_path, _temp_dir) = create_temp_plan_file(&test_plan_basic());

    let output = Command::new(gridplan_bin())
        .args(["validate", plan_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["valid"], true);
    assert!(result["errors"].as_array().unwrap().is_empty());
    assert_eq!(result["floors"].as_array().unwrap().len(), 2);
}

#[test]
fn test_validate_missing_version() {
    let (plan_path, _temp_dir) =
        create_temp_text_file(r#"{"rooms": {"1": [], "2": []}, "doors": {"1": [], "2": []}}"#);

    let output = Command::new(gridplan_bin())
        .args(["validate", plan_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["valid"], false);
    assert_eq!(result["errors"][0]["severity"], "error");
    assert_eq!(result["errors"][0]["message"], "missing version field");
}

#[test]
fn test_validate_bad_door_width() {
    let (plan_path, _temp_dir) = create_temp_text_file(
        r#"{"version": 1,
            "rooms": {"1": [], "2": []},
            "doors": {"1": [{"id": "d", "x": 1.0, "y": 1.0, "orient": "h", "type": "single", "width": 7}], "2": []}}"#,
    );

    let output = Command::new(gridplan_bin())
        .args(["validate", plan_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗ Validation failed"));
    assert!(stdout.contains("[Floor 1]"));
}

#[test]
fn test_validate_overlap_warning_and_strict() {
    let (plan_path, _temp_dir) = create_temp_plan_file(&test_plan_overlapping());

    let output = Command::new(gridplan_bin())
        .args(["validate", plan_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Overlapping rooms: a, b"));

    let strict = Command::new(gridplan_bin())
        .args(["validate", plan_path.to_str().unwrap(), "--strict"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_validate_missing_file() {
    let output = Command::new(gridplan_bin())
        .args(["validate", "/nonexistent/plan.json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}
