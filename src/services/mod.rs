//! Service layer for plan logic.
//!
//! Pure grid geometry and derived views, plus the file and autosave I/O
//! that the TUI and the CLI share.

pub mod analysis;
pub mod autosave;
pub mod geometry;
pub mod plans;

// Re-export commonly used types and functions
pub use analysis::{overlapping_rooms, summarize, total_area, FloorSummary};
pub use autosave::{AutosaveSlot, PlanStore};
pub use plans::PlanService;
