//! Pointer drag tracking.

use crate::services::geometry::GridPoint;

/// Kind of entity being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// A room, placed on whole cells
    Room,
    /// A door, placed on half cells
    Door,
}

/// The single active drag target.
///
/// `offset` is the pointer's grid-space offset from the entity anchor at
/// drag start. It stays fixed until the drag ends.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// What is being dragged
    pub kind: DragKind,
    /// Id of the dragged entity
    pub id: String,
    /// Pointer offset from the anchor
    pub offset: GridPoint,
}

impl DragState {
    /// Starts a drag of `id` picked up at `pointer`, with its anchor at `anchor`.
    pub fn start(kind: DragKind, id: impl Into<String>, pointer: GridPoint, anchor: GridPoint) -> Self {
        Self {
            kind,
            id: id.into(),
            offset: pointer - anchor,
        }
    }
}
