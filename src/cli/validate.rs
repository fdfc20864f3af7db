//! Validation command for plan files.

use crate::cli::common::{CliError, CliResult};
use crate::models::Floor;
use crate::parser::{self, ImportError};
use crate::services::{summarize, FloorSummary};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Validate a plan file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Plan file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings (overlapping rooms) as errors
    #[arg(long)]
    pub strict: bool,
}

/// One problem found in a plan file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    /// "error" or "warning"
    pub severity: String,
    /// Description of the problem
    pub message: String,
    /// Floor the problem is on, if it belongs to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<u8>,
}

/// Validation result, as printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// Whether the file can be imported
    pub valid: bool,
    /// Errors and warnings, errors first
    pub errors: Vec<ValidationMessage>,
    /// Per-floor summaries (empty when the file is rejected)
    pub floors: Vec<FloorSummary>,
}

impl ValidationResponse {
    /// Checks envelope text the same way an import would.
    #[must_use]
    pub fn check(text: &str) -> Self {
        match parser::decode(text) {
            Ok(plan) => {
                let floors: Vec<FloorSummary> =
                    Floor::ALL.into_iter().map(|f| summarize(&plan, f)).collect();
                let errors = floors
                    .iter()
                    .filter(|summary| !summary.overlapping.is_empty())
                    .map(|summary| ValidationMessage {
                        severity: "warning".to_string(),
                        message: format!("Overlapping rooms: {}", summary.overlapping.join(", ")),
                        floor: Some(summary.floor),
                    })
                    .collect();
                Self {
                    valid: true,
                    errors,
                    floors,
                }
            }
            Err(err) => {
                let floor = match &err {
                    ImportError::InvalidEntity { floor, .. } => Some(floor.number()),
                    _ => None,
                };
                Self {
                    valid: false,
                    errors: vec![ValidationMessage {
                        severity: "error".to_string(),
                        message: err.to_string(),
                        floor,
                    }],
                    floors: Vec::new(),
                }
            }
        }
    }

    fn has_warnings(&self) -> bool {
        self.errors.iter().any(|m| m.severity == "warning")
    }
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let text = fs::read_to_string(&self.file).map_err(|e| {
            CliError::io(format!("Failed to read {}: {e}", self.file.display()))
        })?;

        let response = ValidationResponse::check(&text);
        tracing::debug!(valid = response.valid, issues = response.errors.len(), "validated plan");

        // Output results
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print_response(&response);
        }

        // Exit code
        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && response.has_warnings() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

fn print_response(response: &ValidationResponse) {
    if response.valid {
        println!("✓ Validation passed");
    } else {
        println!("✗ Validation failed");
    }

    if !response.floors.is_empty() {
        println!("\nFloors:");
        for summary in &response.floors {
            println!(
                "  Floor {}: {} rooms, {} doors, area {:.1}",
                summary.floor, summary.rooms, summary.doors, summary.area
            );
        }
    }

    if !response.errors.is_empty() {
        println!("\nIssues:");
        for msg in &response.errors {
            let prefix = if msg.severity == "error" {
                "  ✗"
            } else {
                "  ⚠"
            };
            match msg.floor {
                Some(floor) => println!("{prefix} [Floor {floor}] {}", msg.message),
                None => println!("{prefix} {}", msg.message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: &str = r#"{"version": 1, "rooms": {"1": [], "2": []}, "doors": {"1": [], "2": []}}"#;

    #[test]
    fn test_empty_plan_is_valid() {
        let response = ValidationResponse::check(EMPTY);
        assert!(response.valid);
        assert!(response.errors.is_empty());
        assert_eq!(response.floors.len(), 2);
    }

    #[test]
    fn test_wrong_version_is_an_error() {
        let response = ValidationResponse::check(&EMPTY.replace("\"version\": 1", "\"version\": 2"));
        assert!(!response.valid);
        assert_eq!(response.errors[0].severity, "error");
        assert!(response.errors[0].message.contains("unsupported version"));
        assert!(response.floors.is_empty());
    }

    #[test]
    fn test_out_of_bounds_room_names_its_floor() {
        let text = r#"{"version": 1,
            "rooms": {"1": [], "2": [{"id": "r1", "name": "Hall", "category": "utility", "x": 12, "y": 0, "w": 3, "h": 2}]},
            "doors": {"1": [], "2": []}}"#;
        let response = ValidationResponse::check(text);
        assert!(!response.valid);
        assert_eq!(response.errors[0].floor, Some(2));
    }

    #[test]
    fn test_overlap_is_a_warning() {
        let text = r#"{"version": 1,
            "rooms": {"1": [
                {"id": "a", "name": "A", "category": "living", "x": 0, "y": 0, "w": 3, "h": 3},
                {"id": "b", "name": "B", "category": "bath", "x": 2, "y": 2, "w": 3, "h": 3}
            ], "2": []},
            "doors": {"1": [], "2": []}}"#;
        let response = ValidationResponse::check(text);
        assert!(response.valid);
        assert!(response.has_warnings());
        assert_eq!(response.errors[0].floor, Some(1));
        assert!(response.errors[0].message.contains("a, b"));
    }
}
