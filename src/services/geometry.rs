//! Grid geometry: coordinate mapping, snapping, clamped placement and
//! the resize/rotate rules for rooms.
//!
//! Everything here is a pure function of its inputs. Operations that would
//! leave a room outside the grid return `None` instead of an error; callers
//! treat that as a silent no-op.

// Grid coordinates are small; f64 -> i32 rounding never truncates in practice
#![allow(clippy::cast_possible_truncation)]

use std::ops::Sub;

use crate::models::Room;

/// Grid width in cells.
pub const GRID_W: i32 = 14;

/// Grid height in cells.
pub const GRID_H: i32 = 12;

/// Terminal columns per grid cell.
pub const CELL_COLS: u16 = 4;

/// Terminal rows per grid cell.
pub const CELL_ROWS: u16 = 2;

/// A point in fractional grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridPoint {
    /// Column, in cells
    pub x: f64,
    /// Row, in cells
    pub y: f64,
}

impl GridPoint {
    /// Creates a grid point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The unit cell containing this point.
    #[must_use]
    pub fn cell(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl Sub for GridPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// On-screen placement of the grid canvas.
///
/// Terminal cells are not square, so a grid cell has separate width and
/// height in screen units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    /// Screen x of grid column 0
    pub left: f64,
    /// Screen y of grid row 0
    pub top: f64,
    /// Screen units per grid cell, horizontally
    pub cell_width: f64,
    /// Screen units per grid cell, vertically
    pub cell_height: f64,
}

impl CanvasBounds {
    /// Creates canvas bounds.
    #[must_use]
    pub const fn new(left: f64, top: f64, cell_width: f64, cell_height: f64) -> Self {
        Self {
            left,
            top,
            cell_width,
            cell_height,
        }
    }

    /// Converts a screen position into fractional grid coordinates.
    #[must_use]
    pub fn to_grid(&self, screen_x: f64, screen_y: f64) -> GridPoint {
        GridPoint::new(
            (screen_x - self.left) / self.cell_width,
            (screen_y - self.top) / self.cell_height,
        )
    }
}

/// Maps a pointer position to grid coordinates.
///
/// Returns the origin when the canvas has not been laid out yet, rather than
/// failing. Bounds must be measured fresh for every pointer event.
#[must_use]
pub fn pointer_to_grid(screen_x: f64, screen_y: f64, bounds: Option<&CanvasBounds>) -> GridPoint {
    bounds.map_or_else(GridPoint::default, |b| b.to_grid(screen_x, screen_y))
}

/// Rounds to the nearest integer, with halves rounding up (towards +inf).
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snaps a coordinate to the nearest half cell.
#[must_use]
pub fn snap_half(value: f64) -> f64 {
    round_half_up(value * 2.0) / 2.0
}

/// Whether a coordinate lies on the half-cell lattice.
#[must_use]
pub fn is_half_step(value: f64) -> bool {
    let doubled = value * 2.0;
    (doubled - doubled.round()).abs() < f64::EPSILON
}

/// Clamps a room anchor so a `w x h` footprint stays inside the grid.
#[must_use]
pub fn clamp_room_anchor(x: i32, y: i32, w: i32, h: i32) -> (i32, i32) {
    (
        x.clamp(0, (GRID_W - w).max(0)),
        y.clamp(0, (GRID_H - h).max(0)),
    )
}

/// Clamps a room size to the grid dimensions.
#[must_use]
pub fn clamp_room_size(w: i32, h: i32) -> (i32, i32) {
    (w.clamp(1, GRID_W), h.clamp(1, GRID_H))
}

/// Computes a dragged room's anchor.
///
/// `offset` is the pointer's offset from the anchor captured when the drag
/// started. The result is rounded to whole cells and clamped into the grid.
#[must_use]
pub fn place_room(pointer: GridPoint, offset: GridPoint, w: i32, h: i32) -> (i32, i32) {
    let target = pointer - offset;
    clamp_room_anchor(
        round_half_up(target.x) as i32,
        round_half_up(target.y) as i32,
        w,
        h,
    )
}

/// Computes a door anchor: snapped to half cells, clamped per axis.
///
/// Doors may sit on the grid boundary itself.
#[must_use]
pub fn place_door(point: GridPoint) -> (f64, f64) {
    (
        snap_half(point.x).clamp(0.0, f64::from(GRID_W)),
        snap_half(point.y).clamp(0.0, f64::from(GRID_H)),
    )
}

/// Resizes a room by `(dw, dh)` keeping its anchor fixed.
///
/// Returns `None` when the new footprint would leave the grid.
#[must_use]
pub fn resize_room(room: &Room, dw: i32, dh: i32) -> Option<Room> {
    let (w, h) = clamp_room_size(room.w + dw, room.h + dh);
    if room.x + w > GRID_W || room.y + h > GRID_H {
        return None;
    }
    Some(room.with_size(w, h))
}

/// Swaps a room's width and height keeping its anchor fixed.
///
/// Returns `None` when the rotated footprint would leave the grid.
#[must_use]
pub fn rotate_room(room: &Room) -> Option<Room> {
    if room.x + room.h > GRID_W || room.y + room.w > GRID_H {
        return None;
    }
    Some(room.with_size(room.h, room.w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomCategory;

    fn room(x: i32, y: i32, w: i32, h: i32) -> Room {
        Room::new("Test", RoomCategory::Living, x, y, w, h)
    }

    #[test]
    fn test_canvas_to_grid() {
        let bounds = CanvasBounds::new(10.0, 5.0, 4.0, 2.0);
        let point = bounds.to_grid(18.0, 9.0);
        assert_eq!(point, GridPoint::new(2.0, 2.0));
        let point = bounds.to_grid(12.0, 6.0);
        assert_eq!(point, GridPoint::new(0.5, 0.5));
    }

    #[test]
    fn test_pointer_without_canvas_is_origin() {
        assert_eq!(pointer_to_grid(42.0, 17.0, None), GridPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_pointer_with_square_cells_matches_pixel_formula() {
        let bounds = CanvasBounds::new(100.0, 50.0, 40.0, 40.0);
        let point = pointer_to_grid(220.0, 130.0, Some(&bounds));
        assert_eq!(point, GridPoint::new(3.0, 2.0));
    }

    #[test]
    fn test_round_half_up() {
        assert!((round_half_up(2.5) - 3.0).abs() < f64::EPSILON);
        assert!((round_half_up(2.49) - 2.0).abs() < f64::EPSILON);
        assert!((round_half_up(-0.5) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_half() {
        assert!((snap_half(1.2) - 1.0).abs() < f64::EPSILON);
        assert!((snap_half(1.3) - 1.5).abs() < f64::EPSILON);
        assert!((snap_half(1.75) - 2.0).abs() < f64::EPSILON);
        assert!(is_half_step(snap_half(7.31)));
        assert!(!is_half_step(0.25));
    }

    #[test]
    fn test_place_room_keeps_offset() {
        // Picked up one cell right and one down from the anchor
        let offset = GridPoint::new(1.0, 1.0);
        let (x, y) = place_room(GridPoint::new(5.2, 4.6), offset, 3, 3);
        assert_eq!((x, y), (4, 4));
    }

    #[test]
    fn test_place_room_clamps_to_grid() {
        let offset = GridPoint::default();
        assert_eq!(place_room(GridPoint::new(-3.0, -1.0), offset, 2, 2), (0, 0));
        assert_eq!(place_room(GridPoint::new(20.0, 20.0), offset, 3, 4), (11, 8));
        assert_eq!(place_room(GridPoint::new(13.0, 0.0), offset, 14, 1), (0, 0));
    }

    #[test]
    fn test_place_door_snaps_and_clamps() {
        assert_eq!(place_door(GridPoint::new(3.3, 4.9)), (3.5, 5.0));
        assert_eq!(place_door(GridPoint::new(-1.0, 15.0)), (0.0, 12.0));
        assert_eq!(place_door(GridPoint::new(14.2, 0.1)), (14.0, 0.0));
    }

    #[test]
    fn test_resize_grows_within_bounds() {
        let resized = resize_room(&room(2, 2, 3, 3), 1, 2).unwrap();
        assert_eq!((resized.x, resized.y, resized.w, resized.h), (2, 2, 4, 5));
    }

    #[test]
    fn test_resize_rejected_at_boundary() {
        let original = room(12, 0, 2, 2);
        assert!(resize_room(&original, 1, 0).is_none());
        assert!(resize_room(&room(0, 10, 2, 2), 0, 1).is_none());
    }

    #[test]
    fn test_resize_never_below_one() {
        let resized = resize_room(&room(0, 0, 1, 1), -1, -3).unwrap();
        assert_eq!((resized.w, resized.h), (1, 1));
    }

    #[test]
    fn test_rotate_swaps_when_room_to_spare() {
        let rotated = rotate_room(&room(0, 0, 5, 2)).unwrap();
        assert_eq!((rotated.w, rotated.h), (2, 5));
        let square = rotate_room(&room(4, 4, 3, 3)).unwrap();
        assert_eq!((square.w, square.h), (3, 3));
    }

    #[test]
    fn test_rotate_rejected_out_of_bounds() {
        // 2 wide, 6 tall at x = 10: rotated width 6 would need x + 6 <= 14
        assert!(rotate_room(&room(10, 0, 2, 6)).is_none());
        // 6 wide, 1 tall at y = 8: rotated height 6 would need y + 6 <= 12
        assert!(rotate_room(&room(0, 8, 6, 1)).is_none());
    }
}
