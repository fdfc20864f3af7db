//! Shared types for CLI commands: exit codes, errors and plan sources.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::Plan;
use crate::parser::ImportError;
use crate::services::{AutosaveSlot, PlanService};

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was read but rejected (bad envelope, invalid entity, strict warnings)
    ValidationError = 1,
    /// File system, config or usage problem
    IoError = 2,
}

/// Error returned by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Rejected input (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O or usage failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Maps a plan import failure, naming the offending file.
    pub fn from_import(path: &Path, err: &ImportError) -> Self {
        let message = format!("{}: {err}", path.display());
        match err {
            ImportError::Io(_) => Self::io(message),
            _ => Self::validation(message),
        }
    }

    /// Numeric process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.code as i32
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Options shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    /// Overrides the configured autosave directory
    pub autosave_dir: Option<PathBuf>,
}

impl CliContext {
    /// Resolves the autosave slot from the flag, then the config file.
    pub fn autosave_slot(&self) -> CliResult<AutosaveSlot> {
        if let Some(dir) = &self.autosave_dir {
            return Ok(AutosaveSlot::in_dir(dir));
        }
        let config =
            Config::load().map_err(|e| CliError::io(format!("Failed to load config: {e:#}")))?;
        let dir = config
            .autosave_dir(None)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        Ok(AutosaveSlot::in_dir(&dir))
    }

    /// Loads a plan from `input`, or from the autosave slot when no input is given.
    ///
    /// An empty slot yields an empty plan; a corrupt one is an error.
    pub fn load_plan(&self, input: Option<&Path>) -> CliResult<Plan> {
        if let Some(path) = input {
            return PlanService::read(path).map_err(|e| CliError::from_import(path, &e));
        }

        let slot = self.autosave_slot()?;
        if !slot.path().exists() {
            tracing::debug!(path = %slot.path().display(), "autosave slot empty");
            return Ok(Plan::new());
        }
        PlanService::read(slot.path()).map_err(|e| CliError::from_import(slot.path(), &e))
    }
}
