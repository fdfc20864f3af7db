//! The plan aggregate and its single update path.

use crate::models::door::{MAX_DOOR_WIDTH, MIN_DOOR_WIDTH};
use crate::models::{Door, DoorStyle, Floor, Orientation, PerFloor, Room, RoomCategory};
use crate::services::geometry::{
    self, clamp_room_anchor, clamp_room_size, place_door, GridPoint,
};

/// Form-editable fields of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPatch {
    /// Display name
    pub name: String,
    /// Display category
    pub category: RoomCategory,
    /// Requested left column
    pub x: i32,
    /// Requested top row
    pub y: i32,
    /// Requested width
    pub w: i32,
    /// Requested height
    pub h: i32,
}

impl From<&Room> for RoomPatch {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            category: room.category,
            x: room.x,
            y: room.y,
            w: room.w,
            h: room.h,
        }
    }
}

/// Form-editable fields of a door.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorPatch {
    /// Requested anchor column
    pub x: f64,
    /// Requested anchor row
    pub y: f64,
    /// Orientation
    pub orient: Orientation,
    /// Display style
    pub style: DoorStyle,
    /// Requested width in half cells
    pub width: u8,
}

impl From<&Door> for DoorPatch {
    fn from(door: &Door) -> Self {
        Self {
            x: door.x,
            y: door.y,
            orient: door.orient,
            style: door.style,
            width: door.width,
        }
    }
}

/// A single change to a plan.
///
/// Positions and sizes carried by an edit are requests: [`Plan::apply`]
/// clamps and snaps them so the result always satisfies the entity
/// invariants. Resize and rotate requests that cannot fit are dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEdit {
    /// Appends a room
    AddRoom {
        /// Target floor
        floor: Floor,
        /// Room to add
        room: Room,
    },
    /// Appends a door
    AddDoor {
        /// Target floor
        floor: Floor,
        /// Door to add
        door: Door,
    },
    /// Moves a room's anchor
    MoveRoom {
        /// Floor holding the room
        floor: Floor,
        /// Room id
        id: String,
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
    },
    /// Moves a door's anchor
    MoveDoor {
        /// Floor holding the door
        floor: Floor,
        /// Door id
        id: String,
        /// Requested column
        x: f64,
        /// Requested row
        y: f64,
    },
    /// Grows or shrinks a room around its fixed anchor
    ResizeRoom {
        /// Floor holding the room
        floor: Floor,
        /// Room id
        id: String,
        /// Width delta
        dw: i32,
        /// Height delta
        dh: i32,
    },
    /// Swaps a room's width and height
    RotateRoom {
        /// Floor holding the room
        floor: Floor,
        /// Room id
        id: String,
    },
    /// Overwrites a room's editable fields
    UpdateRoom {
        /// Floor holding the room
        floor: Floor,
        /// Room id
        id: String,
        /// New field values
        patch: RoomPatch,
    },
    /// Overwrites a door's editable fields
    UpdateDoor {
        /// Floor holding the door
        floor: Floor,
        /// Door id
        id: String,
        /// New field values
        patch: DoorPatch,
    },
    /// Removes a room
    DeleteRoom {
        /// Floor holding the room
        floor: Floor,
        /// Room id
        id: String,
    },
    /// Removes a door
    DeleteDoor {
        /// Floor holding the door
        floor: Floor,
        /// Door id
        id: String,
    },
    /// Replaces both floors wholesale
    Replace(Plan),
}

/// Rooms and doors for both floors.
///
/// The plan is an owned aggregate. Every change goes through
/// [`Plan::apply`], which consumes the plan and returns the updated one.
/// Entities are never mutated in place: a changed entity is a new value
/// swapped into its list.
///
/// `revision` counts applied changes and is used to key derived values.
/// It is not part of the persisted form and is ignored by equality.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    rooms: PerFloor<Vec<Room>>,
    doors: PerFloor<Vec<Door>>,
    revision: u64,
}

impl PartialEq for Plan {
    fn eq(&self, other: &Self) -> bool {
        self.rooms == other.rooms && self.doors == other.doors
    }
}

impl Plan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan from per-floor lists, taken as-is.
    #[must_use]
    pub const fn from_parts(rooms: PerFloor<Vec<Room>>, doors: PerFloor<Vec<Door>>) -> Self {
        Self {
            rooms,
            doors,
            revision: 0,
        }
    }

    /// Per-floor room lists.
    #[must_use]
    pub const fn all_rooms(&self) -> &PerFloor<Vec<Room>> {
        &self.rooms
    }

    /// Per-floor door lists.
    #[must_use]
    pub const fn all_doors(&self) -> &PerFloor<Vec<Door>> {
        &self.doors
    }

    /// Rooms on a floor, in insertion order.
    #[must_use]
    pub fn rooms(&self, floor: Floor) -> &[Room] {
        self.rooms.get(floor)
    }

    /// Doors on a floor, in insertion order.
    #[must_use]
    pub fn doors(&self, floor: Floor) -> &[Door] {
        self.doors.get(floor)
    }

    /// Looks up a room by id.
    #[must_use]
    pub fn room(&self, floor: Floor, id: &str) -> Option<&Room> {
        self.rooms(floor).iter().find(|r| r.id == id)
    }

    /// Looks up a door by id.
    #[must_use]
    pub fn door(&self, floor: Floor, id: &str) -> Option<&Door> {
        self.doors(floor).iter().find(|d| d.id == id)
    }

    /// Number of applied changes since the plan was created.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether neither floor holds any entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.iter().all(|(_, rooms)| rooms.is_empty())
            && self.doors.iter().all(|(_, doors)| doors.is_empty())
    }

    /// Topmost room covering a grid point. Later rooms draw over earlier ones.
    #[must_use]
    pub fn room_at(&self, floor: Floor, point: GridPoint) -> Option<&Room> {
        let (cx, cy) = point.cell();
        self.rooms(floor)
            .iter()
            .rev()
            .find(|room| room.covers_cell(cx, cy))
    }

    /// Nearest door within `tolerance` cells of a grid point.
    #[must_use]
    pub fn door_near(&self, floor: Floor, point: GridPoint, tolerance: f64) -> Option<&Door> {
        self.doors(floor)
            .iter()
            .map(|door| (door, door.distance_to(point.x, point.y)))
            .filter(|(_, distance)| *distance <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(door, _)| door)
    }

    /// Default name for the next room on a floor.
    #[must_use]
    pub fn next_room_name(&self, floor: Floor) -> String {
        format!("Room {}", self.rooms(floor).len() + 1)
    }

    /// Applies an edit and returns the updated plan.
    ///
    /// The revision is bumped only when the edit changed something. Edits
    /// naming an unknown id, and resize/rotate requests that would leave
    /// the grid, return the plan unchanged.
    #[must_use]
    pub fn apply(mut self, edit: PlanEdit) -> Self {
        let changed = match edit {
            PlanEdit::Replace(mut next) => {
                next.revision = self.revision + 1;
                return next;
            }
            PlanEdit::AddRoom { floor, room } => {
                self.rooms.get_mut(floor).push(fit_room(room));
                true
            }
            PlanEdit::AddDoor { floor, door } => {
                self.doors.get_mut(floor).push(fit_door(door));
                true
            }
            PlanEdit::MoveRoom { floor, id, x, y } => self.replace_room(floor, &id, |room| {
                let (x, y) = clamp_room_anchor(x, y, room.w, room.h);
                Some(room.with_position(x, y))
            }),
            PlanEdit::MoveDoor { floor, id, x, y } => self.replace_door(floor, &id, |door| {
                let (x, y) = place_door(GridPoint::new(x, y));
                Some(door.with_position(x, y))
            }),
            PlanEdit::ResizeRoom { floor, id, dw, dh } => {
                self.replace_room(floor, &id, |room| geometry::resize_room(room, dw, dh))
            }
            PlanEdit::RotateRoom { floor, id } => {
                self.replace_room(floor, &id, geometry::rotate_room)
            }
            PlanEdit::UpdateRoom { floor, id, patch } => self.replace_room(floor, &id, |room| {
                Some(fit_room(Room {
                    id: room.id.clone(),
                    name: patch.name,
                    category: patch.category,
                    x: patch.x,
                    y: patch.y,
                    w: patch.w,
                    h: patch.h,
                }))
            }),
            PlanEdit::UpdateDoor { floor, id, patch } => self.replace_door(floor, &id, |door| {
                Some(fit_door(Door {
                    id: door.id.clone(),
                    x: patch.x,
                    y: patch.y,
                    orient: patch.orient,
                    style: patch.style,
                    width: patch.width,
                }))
            }),
            PlanEdit::DeleteRoom { floor, id } => {
                let rooms = self.rooms.get_mut(floor);
                let before = rooms.len();
                rooms.retain(|room| room.id != id);
                rooms.len() != before
            }
            PlanEdit::DeleteDoor { floor, id } => {
                let doors = self.doors.get_mut(floor);
                let before = doors.len();
                doors.retain(|door| door.id != id);
                doors.len() != before
            }
        };

        if changed {
            self.revision += 1;
        }
        self
    }

    fn replace_room(
        &mut self,
        floor: Floor,
        id: &str,
        update: impl FnOnce(&Room) -> Option<Room>,
    ) -> bool {
        let rooms = self.rooms.get_mut(floor);
        let Some(index) = rooms.iter().position(|room| room.id == id) else {
            return false;
        };
        match update(&rooms[index]) {
            Some(next) if next != rooms[index] => {
                rooms[index] = next;
                true
            }
            _ => false,
        }
    }

    fn replace_door(
        &mut self,
        floor: Floor,
        id: &str,
        update: impl FnOnce(&Door) -> Option<Door>,
    ) -> bool {
        let doors = self.doors.get_mut(floor);
        let Some(index) = doors.iter().position(|door| door.id == id) else {
            return false;
        };
        match update(&doors[index]) {
            Some(next) if next != doors[index] => {
                doors[index] = next;
                true
            }
            _ => false,
        }
    }
}

/// Clamps a room's size, then its anchor, into the grid.
fn fit_room(room: Room) -> Room {
    let (w, h) = clamp_room_size(room.w, room.h);
    let (x, y) = clamp_room_anchor(room.x, room.y, w, h);
    Room { x, y, w, h, ..room }
}

/// Clamps a door's width and snaps its anchor into the grid.
fn fit_door(door: Door) -> Door {
    let (x, y) = place_door(GridPoint::new(door.x, door.y));
    Door {
        x,
        y,
        width: door.width.clamp(MIN_DOOR_WIDTH, MAX_DOOR_WIDTH),
        ..door
    }
}
