//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use gridplan::models::{Door, DoorStyle, Floor, Orientation, Plan, PlanEdit, Room, RoomCategory};
use gridplan::parser;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a room with a fixed id so output is deterministic.
pub fn room(id: &str, name: &str, x: i32, y: i32, w: i32, h: i32) -> Room {
    let mut room = Room::new(name, RoomCategory::Living, x, y, w, h);
    room.id = id.to_string();
    room
}

/// Builds a door with a fixed id.
pub fn door(id: &str, x: f64, y: f64) -> Door {
    let mut door = Door::new(x, y);
    door.id = id.to_string();
    door
}

/// A small two-floor plan.
///
/// Floor 1: kitchen (5x4) and living room (4x4), no overlap, one door.
/// Floor 2: a single bedroom (3x3) and a vertical sliding door.
pub fn test_plan_basic() -> Plan {
    let mut kitchen = room("k1", "Kitchen", 0, 0, 5, 4);
    kitchen.category = RoomCategory::Kitchen;
    let living = room("l1", "Living", 5, 0, 4, 4);

    let mut bedroom = room("b1", "Bedroom", 2, 2, 3, 3);
    bedroom.category = RoomCategory::Bedroom;
    let mut sliding = door("d2", 2.0, 2.5);
    sliding.orient = Orientation::Vertical;
    sliding.style = DoorStyle::Sliding;

    [
        PlanEdit::AddRoom {
            floor: Floor::First,
            room: kitchen,
        },
        PlanEdit::AddRoom {
            floor: Floor::First,
            room: living,
        },
        PlanEdit::AddDoor {
            floor: Floor::First,
            door: door("d1", 5.0, 1.5),
        },
        PlanEdit::AddRoom {
            floor: Floor::Second,
            room: bedroom,
        },
        PlanEdit::AddDoor {
            floor: Floor::Second,
            door: sliding,
        },
    ]
    .into_iter()
    .fold(Plan::new(), Plan::apply)
}

/// A plan whose two first-floor rooms overlap.
pub fn test_plan_overlapping() -> Plan {
    Plan::new()
        .apply(PlanEdit::AddRoom {
            floor: Floor::First,
            room: room("a", "A", 0, 0, 3, 3),
        })
        .apply(PlanEdit::AddRoom {
            floor: Floor::First,
            room: room("b", "B", 2, 2, 3, 3),
        })
}

/// Writes a plan envelope to `path`.
pub fn write_plan_file(plan: &Plan, path: &Path) -> std::io::Result<()> {
    let json = parser::encode(plan).map_err(std::io::Error::other)?;
    fs::write(path, json)
}

/// Creates a temp directory holding `plan.json`.
pub fn create_temp_plan_file(plan: &Plan) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("plan.json");
    write_plan_file(plan, &path).expect("Failed to write plan file");
    (path, temp_dir)
}

/// Creates a temp directory holding `plan.json` with raw text.
pub fn create_temp_text_file(text: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("plan.json");
    fs::write(&path, text).expect("Failed to write file");
    (path, temp_dir)
}
