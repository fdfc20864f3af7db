//! Room definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::geometry::{GRID_H, GRID_W};

/// Display category of a room.
///
/// Categories only drive the label and color a room is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    /// Living room, lounge, dining
    #[default]
    Living,
    /// Bedroom
    Bedroom,
    /// Kitchen
    Kitchen,
    /// Bathroom, WC
    Bath,
    /// Storage, laundry, hallway
    Utility,
}

impl RoomCategory {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Living,
        Self::Bedroom,
        Self::Kitchen,
        Self::Bath,
        Self::Utility,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Living => "Living",
            Self::Bedroom => "Bedroom",
            Self::Kitchen => "Kitchen",
            Self::Bath => "Bath",
            Self::Utility => "Utility",
        }
    }

    /// Display color as an RGB triple.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Living => (96, 165, 250),
            Self::Bedroom => (167, 139, 250),
            Self::Kitchen => (251, 191, 36),
            Self::Bath => (45, 212, 191),
            Self::Utility => (156, 163, 175),
        }
    }

    /// Next category, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous category, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A rectangular room on the grid.
///
/// # Validation
///
/// - `x >= 0`, `y >= 0`
/// - `w >= 1`, `h >= 1`
/// - `x + w <= GRID_W`, `y + h <= GRID_H`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Opaque unique identifier
    pub id: String,
    /// Display name (free text)
    pub name: String,
    /// Display category
    pub category: RoomCategory,
    /// Left column of the footprint
    pub x: i32,
    /// Top row of the footprint
    pub y: i32,
    /// Width in cells
    pub w: i32,
    /// Height in cells
    pub h: i32,
}

impl Room {
    /// Creates a room with a fresh id.
    ///
    /// The geometry is taken as given; callers clamp it first.
    pub fn new(
        name: impl Into<String>,
        category: RoomCategory,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            x,
            y,
            w,
            h,
        }
    }

    /// Returns a copy placed at a new anchor.
    #[must_use]
    pub fn with_position(&self, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..self.clone()
        }
    }

    /// Returns a copy with a new size (anchor unchanged).
    #[must_use]
    pub fn with_size(&self, w: i32, h: i32) -> Self {
        Self {
            w,
            h,
            ..self.clone()
        }
    }

    /// Whether the footprint lies fully inside the grid.
    #[must_use]
    pub const fn is_in_bounds(&self) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.w >= 1
            && self.h >= 1
            && self.w <= GRID_W - self.x
            && self.h <= GRID_H - self.y
    }

    /// Whether the unit cell `(cx, cy)` belongs to the footprint.
    #[must_use]
    pub const fn covers_cell(&self, cx: i32, cy: i32) -> bool {
        cx >= self.x
            && cx < self.x.saturating_add(self.w)
            && cy >= self.y
            && cy < self.y.saturating_add(self.h)
    }

    /// Iterates over every unit cell of the footprint, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.y..self.y.saturating_add(self.h))
            .flat_map(move |cy| (self.x..self.x.saturating_add(self.w)).map(move |cx| (cx, cy)))
    }

    /// Area in half-cell units: `(w * h) / 2`.
    #[must_use]
    pub fn area(&self) -> f64 {
        f64::from(self.w) * f64::from(self.h) / 2.0
    }

    /// Checks the data-model invariants, describing the first violation.
    pub fn check(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("room id cannot be empty".to_string());
        }
        if self.w < 1 || self.h < 1 {
            return Err(format!("size {}x{} must be at least 1x1", self.w, self.h));
        }
        if !self.is_in_bounds() {
            return Err(format!(
                "footprint ({}, {}, {}x{}) leaves the {}x{} grid",
                self.x, self.y, self.w, self.h, GRID_W, GRID_H
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room_has_unique_id() {
        let a = Room::new("A", RoomCategory::Living, 0, 0, 2, 2);
        let b = Room::new("B", RoomCategory::Living, 0, 0, 2, 2);
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_in_bounds() {
        assert!(Room::new("r", RoomCategory::Bath, 0, 0, 14, 12).is_in_bounds());
        assert!(Room::new("r", RoomCategory::Bath, 12, 10, 2, 2).is_in_bounds());
        assert!(!Room::new("r", RoomCategory::Bath, 13, 0, 2, 2).is_in_bounds());
        assert!(!Room::new("r", RoomCategory::Bath, -1, 0, 2, 2).is_in_bounds());
        assert!(!Room::new("r", RoomCategory::Bath, 0, 0, 0, 2).is_in_bounds());
    }

    #[test]
    fn test_extreme_coordinates_are_out_of_bounds() {
        assert!(!Room::new("r", RoomCategory::Bath, i32::MAX, 0, 1, 1).is_in_bounds());
        assert!(!Room::new("r", RoomCategory::Bath, 0, i32::MAX, 1, 1).is_in_bounds());
        assert!(!Room::new("r", RoomCategory::Bath, 0, 0, i32::MAX, 1).is_in_bounds());
        assert!(!Room::new("r", RoomCategory::Bath, 1, 1, 1, i32::MAX).is_in_bounds());
        assert!(!Room::new("r", RoomCategory::Bath, i32::MIN, 0, i32::MAX, 1).is_in_bounds());

        let edge = Room::new("r", RoomCategory::Bath, i32::MAX - 1, 0, 5, 1);
        assert_eq!(edge.cells().count(), 1);
        assert!(edge.covers_cell(i32::MAX - 1, 0));
    }

    #[test]
    fn test_cells_cover_footprint() {
        let room = Room::new("r", RoomCategory::Kitchen, 1, 2, 3, 2);
        let cells: Vec<_> = room.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], (1, 2));
        assert_eq!(cells[5], (3, 3));
        assert!(cells.iter().all(|&(cx, cy)| room.covers_cell(cx, cy)));
        assert!(!room.covers_cell(4, 2));
    }

    #[test]
    fn test_area_is_half_cells() {
        let room = Room::new("r", RoomCategory::Living, 0, 0, 5, 4);
        assert!((room.area() - 10.0).abs() < f64::EPSILON);
        let odd = Room::new("r", RoomCategory::Living, 0, 0, 3, 1);
        assert!((odd.area() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_position_keeps_identity() {
        let room = Room::new("Hall", RoomCategory::Utility, 0, 0, 2, 2);
        let moved = room.with_position(3, 4);
        assert_eq!(moved.id, room.id);
        assert_eq!((moved.x, moved.y, moved.w, moved.h), (3, 4, 2, 2));
        assert_eq!((room.x, room.y), (0, 0));
    }

    #[test]
    fn test_category_cycle() {
        assert_eq!(RoomCategory::Living.next(), RoomCategory::Bedroom);
        assert_eq!(RoomCategory::Utility.next(), RoomCategory::Living);
        assert_eq!(RoomCategory::Living.previous(), RoomCategory::Utility);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&RoomCategory::Bedroom).unwrap();
        assert_eq!(json, "\"bedroom\"");
        let parsed: RoomCategory = serde_json::from_str("\"bath\"").unwrap();
        assert_eq!(parsed, RoomCategory::Bath);
    }

    #[test]
    fn test_check_reports_out_of_bounds() {
        let room = Room::new("r", RoomCategory::Living, 12, 0, 3, 1);
        let err = room.check().unwrap_err();
        assert!(err.contains("leaves"));
    }
}
