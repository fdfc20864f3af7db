//! Plan file I/O service.
//!
//! Centralizes reading and writing plan files so the TUI and the CLI share
//! the same error messages and the same atomic write.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::models::Plan;
use crate::parser::{self, ImportError};

/// Service for plan file operations.
pub struct PlanService;

impl PlanService {
    /// Reads and validates a plan file, keeping the typed failure reason.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use gridplan::services::PlanService;
    ///
    /// match PlanService::read(Path::new("floorplan.json")) {
    ///     Ok(plan) => println!("{} rooms on floor 1", plan.rooms(Default::default()).len()),
    ///     Err(err) => eprintln!("rejected: {err}"),
    /// }
    /// ```
    pub fn read(path: &Path) -> Result<Plan, ImportError> {
        let text = fs::read_to_string(path)?;
        parser::decode(&text)
    }

    /// Loads a plan file.
    pub fn load(path: &Path) -> Result<Plan> {
        Self::read(path).with_context(|| format!("Failed to load plan from {}", path.display()))
    }

    /// Saves a plan as a pretty-printed envelope.
    ///
    /// This performs an atomic write using a temp file + rename pattern so the
    /// target is never left half-written.
    pub fn save(plan: &Plan, path: &Path) -> Result<()> {
        let text = parser::encode(plan)?;
        write_atomic(path, &text)
            .with_context(|| format!("Failed to save plan to {}", path.display()))
    }
}

/// Writes `contents` to `path` via a sibling temp file and a rename.
///
/// Creates the parent directory if needed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Default export file name for a given day: `floorplan-YYYY-MM-DD.json`.
#[must_use]
pub fn default_export_name(date: NaiveDate) -> String {
    format!("floorplan-{}.json", date.format("%Y-%m-%d"))
}
