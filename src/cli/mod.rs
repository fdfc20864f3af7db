//! CLI command handlers for GridPlan.
//!
//! This module provides headless, scriptable access to plan files and the
//! autosave slot for automation, testing, and CI/CD integration.

pub mod common;
pub mod export;
pub mod import;
pub mod inspect;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliContext, CliError, CliResult, ExitCode};
pub use export::ExportArgs;
pub use import::ImportArgs;
pub use inspect::InspectArgs;
pub use validate::ValidateArgs;
