//! Data models for floor plans: floors, rooms, doors and the plan aggregate.
//!
//! Models are independent of UI and persistence. Derived views such as
//! overlaps and area live in [`crate::services::analysis`].

pub mod door;
pub mod floor;
pub mod plan;
pub mod room;

// Re-export all model types
pub use door::{Door, DoorStyle, Orientation};
pub use floor::{Floor, PerFloor};
pub use plan::{DoorPatch, Plan, PlanEdit, RoomPatch};
pub use room::{Room, RoomCategory};
