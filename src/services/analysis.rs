//! Derived plan views: overlap detection, area totals and per-floor summaries.
//!
//! These are pure functions of a floor's entity lists. Nothing computed here
//! is ever stored on the plan itself.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::models::{Floor, Plan, Room};

/// Returns the ids of every room that shares at least one cell with another room.
///
/// Each occupied cell is claimed by the first room that covers it; a later
/// room landing on a claimed cell flags both itself and the claimant. The
/// result is symmetric and runs in O(total occupied cells).
#[must_use]
pub fn overlapping_rooms(rooms: &[Room]) -> HashSet<String> {
    let mut claims: HashMap<(i32, i32), &str> = HashMap::new();
    let mut overlapping = HashSet::new();

    for room in rooms {
        for cell in room.cells() {
            match claims.get(&cell) {
                Some(&owner) if owner != room.id => {
                    overlapping.insert(owner.to_string());
                    overlapping.insert(room.id.clone());
                }
                Some(_) => {}
                None => {
                    claims.insert(cell, room.id.as_str());
                }
            }
        }
    }

    overlapping
}

/// Sums the area of a floor's rooms, in half-cell units.
#[must_use]
pub fn total_area(rooms: &[Room]) -> f64 {
    rooms.iter().map(Room::area).sum()
}

/// Read-only summary of one floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorSummary {
    /// Floor number (1 or 2)
    pub floor: u8,
    /// Number of rooms
    pub rooms: usize,
    /// Number of doors
    pub doors: usize,
    /// Total area in half-cell units
    pub area: f64,
    /// Ids of overlapping rooms, sorted
    pub overlapping: Vec<String>,
}

/// Builds the summary for one floor of a plan.
#[must_use]
pub fn summarize(plan: &Plan, floor: Floor) -> FloorSummary {
    let rooms = plan.rooms(floor);
    let mut overlapping: Vec<String> = overlapping_rooms(rooms).into_iter().collect();
    overlapping.sort();

    FloorSummary {
        floor: floor.number(),
        rooms: rooms.len(),
        doors: plan.doors(floor).len(),
        area: total_area(rooms),
        overlapping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomCategory;

    fn room(id: &str, x: i32, y: i32, w: i32, h: i32) -> Room {
        let mut room = Room::new(id, RoomCategory::Living, x, y, w, h);
        room.id = id.to_string();
        room
    }

    #[test]
    fn test_overlap_flags_both_rooms() {
        let rooms = vec![room("a", 0, 0, 3, 3), room("b", 2, 2, 3, 3)];
        let overlapping = overlapping_rooms(&rooms);
        assert_eq!(overlapping.len(), 2);
        assert!(overlapping.contains("a"));
        assert!(overlapping.contains("b"));
    }

    #[test]
    fn test_adjacent_rooms_do_not_overlap() {
        let rooms = vec![room("a", 0, 0, 3, 3), room("b", 3, 0, 3, 3)];
        assert!(overlapping_rooms(&rooms).is_empty());
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let forward = vec![room("a", 1, 1, 4, 2), room("b", 4, 2, 2, 2)];
        let reverse: Vec<Room> = forward.iter().rev().cloned().collect();
        assert_eq!(overlapping_rooms(&forward), overlapping_rooms(&reverse));
    }

    #[test]
    fn test_overlap_with_three_rooms_spares_the_outsider() {
        let rooms = vec![
            room("a", 0, 0, 2, 2),
            room("b", 1, 1, 2, 2),
            room("c", 10, 10, 2, 2),
        ];
        let overlapping = overlapping_rooms(&rooms);
        assert!(overlapping.contains("a") && overlapping.contains("b"));
        assert!(!overlapping.contains("c"));
    }

    #[test]
    fn test_contained_room_overlaps() {
        let rooms = vec![room("outer", 0, 0, 6, 6), room("inner", 2, 2, 1, 1)];
        assert_eq!(overlapping_rooms(&rooms).len(), 2);
    }

    #[test]
    fn test_total_area() {
        let rooms = vec![room("a", 0, 0, 5, 4), room("b", 6, 0, 4, 4)];
        assert!((total_area(&rooms) - 18.0).abs() < f64::EPSILON);
        assert!(total_area(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_floor() {
        let plan = Plan::default()
            .apply(crate::models::PlanEdit::AddRoom {
                floor: Floor::Second,
                room: room("a", 0, 0, 3, 3),
            })
            .apply(crate::models::PlanEdit::AddRoom {
                floor: Floor::Second,
                room: room("b", 2, 2, 3, 3),
            });

        let summary = summarize(&plan, Floor::Second);
        assert_eq!(summary.floor, 2);
        assert_eq!(summary.rooms, 2);
        assert_eq!(summary.doors, 0);
        assert!((summary.area - 9.0).abs() < f64::EPSILON);
        assert_eq!(summary.overlapping, vec!["a".to_string(), "b".to_string()]);

        let empty = summarize(&plan, Floor::First);
        assert_eq!(empty.rooms, 0);
        assert!(empty.overlapping.is_empty());
    }
}
