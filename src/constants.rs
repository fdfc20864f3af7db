//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed persistence keys.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "GridPlan";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "gridplan";

/// Fixed key of the local autosave slot. The slot file is `<key>.json`.
pub const AUTOSAVE_KEY: &str = "gridplan.autosave.v1";

/// How long a transient notice stays visible before it clears itself.
pub const NOTICE_TTL_MS: u64 = 2500;

/// Name of the log file written while the TUI owns the terminal.
pub const LOG_FILE_NAME: &str = "gridplan.log";
