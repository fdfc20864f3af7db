//! Parsing and serialization of plan files.
//!
//! Plans are exchanged as a versioned JSON envelope, shared by file
//! export/import and the autosave slot.

pub mod envelope;

// Re-export commonly used functions
pub use envelope::{decode, encode, ImportError, PLAN_VERSION};
