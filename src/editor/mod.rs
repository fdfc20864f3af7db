//! Editing session over a plan.
//!
//! [`Editor`] owns the plan plus the ephemeral UI state around it: active
//! floor, edit mode, selection, the drag target and the transient notice.
//! Every mutation is turned into a [`PlanEdit`] and routed through
//! [`Plan::apply`]; a change that bumps the revision is autosaved.

pub mod drag;
pub mod notice;

use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use crate::models::{Door, DoorPatch, Floor, Plan, PlanEdit, Room, RoomCategory, RoomPatch};
use crate::parser::{self, ImportError};
use crate::services::geometry::{clamp_room_anchor, place_door, place_room, GridPoint};
use crate::services::{overlapping_rooms, total_area, PlanService, PlanStore};

pub use drag::{DragKind, DragState};
pub use notice::{Notice, NoticeKind};

/// How close (in cells) a pointer must be to a door to pick it.
pub const DOOR_HIT_TOLERANCE: f64 = 0.5;

/// Width and height of a newly added room.
pub const NEW_ROOM_SIZE: i32 = 3;

/// Which entity type pointer actions operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Select, add and drag rooms
    #[default]
    Rooms,
    /// Select, add and drag doors
    Doors,
}

impl EditMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Rooms => Self::Doors,
            Self::Doors => Self::Rooms,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rooms => "Rooms",
            Self::Doors => "Doors",
        }
    }
}

/// The selected entity on the active floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A room, by id
    Room(String),
    /// A door, by id
    Door(String),
}

struct OverlapMemo {
    floor: Floor,
    revision: u64,
    ids: Rc<HashSet<String>>,
}

/// An editing session.
pub struct Editor {
    plan: Plan,
    floor: Floor,
    mode: EditMode,
    selection: Option<Selection>,
    drag: Option<DragState>,
    notice: Option<Notice>,
    overlap_memo: RefCell<Option<OverlapMemo>>,
    store: Option<Box<dyn PlanStore>>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Plan::default())
    }
}

impl Editor {
    /// Starts a session over `plan` without autosave.
    #[must_use]
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            floor: Floor::default(),
            mode: EditMode::default(),
            selection: None,
            drag: None,
            notice: None,
            overlap_memo: RefCell::new(None),
            store: None,
        }
    }

    /// Starts a session from whatever `store` holds and autosaves into it.
    ///
    /// A missing or invalid stored plan yields an empty plan.
    #[must_use]
    pub fn restore(store: Box<dyn PlanStore>) -> Self {
        let plan = store.load().unwrap_or_default();
        let mut editor = Self::new(plan);
        editor.store = Some(store);
        editor
    }

    // === Accessors ===

    /// The current plan.
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// The active floor.
    #[must_use]
    pub const fn floor(&self) -> Floor {
        self.floor
    }

    /// The active edit mode.
    #[must_use]
    pub const fn mode(&self) -> EditMode {
        self.mode
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The active drag, if any.
    #[must_use]
    pub const fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Rooms on the active floor.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        self.plan.rooms(self.floor)
    }

    /// Doors on the active floor.
    #[must_use]
    pub fn doors(&self) -> &[Door] {
        self.plan.doors(self.floor)
    }

    /// The selected room, if a room is selected.
    #[must_use]
    pub fn selected_room(&self) -> Option<&Room> {
        match &self.selection {
            Some(Selection::Room(id)) => self.plan.room(self.floor, id),
            _ => None,
        }
    }

    /// The selected door, if a door is selected.
    #[must_use]
    pub fn selected_door(&self) -> Option<&Door> {
        match &self.selection {
            Some(Selection::Door(id)) => self.plan.door(self.floor, id),
            _ => None,
        }
    }

    // === Derived views ===

    /// Total room area of the active floor, in half-cell units.
    #[must_use]
    pub fn area(&self) -> f64 {
        total_area(self.rooms())
    }

    /// Ids of overlapping rooms on the active floor.
    ///
    /// Memoized by floor and plan revision.
    #[must_use]
    pub fn overlaps(&self) -> Rc<HashSet<String>> {
        let revision = self.plan.revision();
        let mut memo = self.overlap_memo.borrow_mut();
        if let Some(cached) = memo.as_ref() {
            if cached.floor == self.floor && cached.revision == revision {
                return Rc::clone(&cached.ids);
            }
        }

        let ids = Rc::new(overlapping_rooms(self.rooms()));
        *memo = Some(OverlapMemo {
            floor: self.floor,
            revision,
            ids: Rc::clone(&ids),
        });
        ids
    }

    // === Floor and mode ===

    /// Switches the active floor. Clears the selection.
    pub fn switch_floor(&mut self, floor: Floor) {
        if floor != self.floor {
            self.floor = floor;
            self.clear_selection();
        }
    }

    /// Switches the edit mode. Clears the selection.
    pub fn set_mode(&mut self, mode: EditMode) {
        if mode != self.mode {
            self.mode = mode;
            self.clear_selection();
        }
    }

    /// Drops the selection and any drag in progress.
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.drag = None;
    }

    // === Selection and creation ===

    /// Selects whatever the pointer hits in the current mode.
    ///
    /// Clicking empty space clears the selection.
    pub fn select_at(&mut self, point: GridPoint) -> Option<&Selection> {
        self.selection = self.hit(point);
        self.selection.as_ref()
    }

    /// Adds a room or a door at `point`, depending on the mode.
    pub fn add_at(&mut self, point: GridPoint) {
        match self.mode {
            EditMode::Rooms => self.add_room_at(point),
            EditMode::Doors => self.add_door_at(point),
        }
    }

    /// Adds a default 3x3 room anchored at the cell under `point` and selects it.
    pub fn add_room_at(&mut self, point: GridPoint) {
        let (cx, cy) = point.cell();
        let (x, y) = clamp_room_anchor(cx, cy, NEW_ROOM_SIZE, NEW_ROOM_SIZE);
        let room = Room::new(
            self.plan.next_room_name(self.floor),
            RoomCategory::default(),
            x,
            y,
            NEW_ROOM_SIZE,
            NEW_ROOM_SIZE,
        );
        let id = room.id.clone();
        tracing::debug!(floor = self.floor.number(), x, y, "adding room");
        self.commit(PlanEdit::AddRoom {
            floor: self.floor,
            room,
        });
        self.selection = Some(Selection::Room(id));
    }

    /// Adds a default door at the snapped `point` and selects it.
    pub fn add_door_at(&mut self, point: GridPoint) {
        let (x, y) = place_door(point);
        let door = Door::new(x, y);
        let id = door.id.clone();
        tracing::debug!(floor = self.floor.number(), x, y, "adding door");
        self.commit(PlanEdit::AddDoor {
            floor: self.floor,
            door,
        });
        self.selection = Some(Selection::Door(id));
    }

    /// Deletes the selected entity.
    pub fn delete_selected(&mut self) -> bool {
        let edit = match self.selection.take() {
            Some(Selection::Room(id)) => PlanEdit::DeleteRoom {
                floor: self.floor,
                id,
            },
            Some(Selection::Door(id)) => PlanEdit::DeleteDoor {
                floor: self.floor,
                id,
            },
            None => return false,
        };
        self.drag = None;
        self.commit(edit)
    }

    // === Dragging ===

    /// Picks up the entity under the pointer and selects it.
    ///
    /// Returns `false` (and clears the selection) when nothing is hit.
    pub fn begin_drag(&mut self, point: GridPoint) -> bool {
        let Some(selection) = self.hit(point) else {
            self.clear_selection();
            return false;
        };

        let drag = match &selection {
            Selection::Room(id) => self.plan.room(self.floor, id).map(|room| {
                let anchor = GridPoint::new(f64::from(room.x), f64::from(room.y));
                DragState::start(DragKind::Room, id.clone(), point, anchor)
            }),
            Selection::Door(id) => self.plan.door(self.floor, id).map(|door| {
                DragState::start(DragKind::Door, id.clone(), point, GridPoint::new(door.x, door.y))
            }),
        };

        self.selection = Some(selection);
        self.drag = drag;
        self.drag.is_some()
    }

    /// Moves the dragged entity so it keeps its offset from the pointer.
    pub fn drag_to(&mut self, point: GridPoint) -> bool {
        let Some(drag) = self.drag.clone() else {
            return false;
        };

        let edit = match drag.kind {
            DragKind::Room => {
                let Some(room) = self.plan.room(self.floor, &drag.id) else {
                    self.drag = None;
                    return false;
                };
                let (x, y) = place_room(point, drag.offset, room.w, room.h);
                PlanEdit::MoveRoom {
                    floor: self.floor,
                    id: drag.id,
                    x,
                    y,
                }
            }
            DragKind::Door => {
                let (x, y) = place_door(point - drag.offset);
                PlanEdit::MoveDoor {
                    floor: self.floor,
                    id: drag.id,
                    x,
                    y,
                }
            }
        };

        self.commit(edit)
    }

    /// Ends the drag, wherever the pointer is. The selection stays.
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    // === Selection edits ===

    /// Grows or shrinks the selected room around its anchor.
    ///
    /// Requests that would leave the grid are dropped silently.
    pub fn resize_selected(&mut self, dw: i32, dh: i32) -> bool {
        let Some(Selection::Room(id)) = self.selection.clone() else {
            return false;
        };
        let changed = self.commit(PlanEdit::ResizeRoom {
            floor: self.floor,
            id,
            dw,
            dh,
        });
        if !changed {
            tracing::debug!(dw, dh, "resize ignored");
        }
        changed
    }

    /// Swaps the selected room's width and height if it still fits.
    pub fn rotate_selected(&mut self) -> bool {
        let Some(Selection::Room(id)) = self.selection.clone() else {
            return false;
        };
        let changed = self.commit(PlanEdit::RotateRoom {
            floor: self.floor,
            id,
        });
        if !changed {
            tracing::debug!("rotate ignored");
        }
        changed
    }

    /// Moves the selection by whole steps: cells for rooms, half cells for doors.
    pub fn nudge_selected(&mut self, dx: i32, dy: i32) -> bool {
        let edit = if let Some(room) = self.selected_room() {
            PlanEdit::MoveRoom {
                floor: self.floor,
                id: room.id.clone(),
                x: room.x + dx,
                y: room.y + dy,
            }
        } else if let Some(door) = self.selected_door() {
            PlanEdit::MoveDoor {
                floor: self.floor,
                id: door.id.clone(),
                x: door.x + f64::from(dx) / 2.0,
                y: door.y + f64::from(dy) / 2.0,
            }
        } else {
            return false;
        };
        self.commit(edit)
    }

    /// Applies form values to the selected room.
    pub fn update_selected_room(&mut self, patch: RoomPatch) -> bool {
        let Some(Selection::Room(id)) = self.selection.clone() else {
            return false;
        };
        self.commit(PlanEdit::UpdateRoom {
            floor: self.floor,
            id,
            patch,
        })
    }

    /// Applies form values to the selected door.
    pub fn update_selected_door(&mut self, patch: DoorPatch) -> bool {
        let Some(Selection::Door(id)) = self.selection.clone() else {
            return false;
        };
        self.commit(PlanEdit::UpdateDoor {
            floor: self.floor,
            id,
            patch,
        })
    }

    // === Import / export ===

    /// Serializes the whole plan as an envelope.
    pub fn export_json(&self) -> Result<String> {
        parser::encode(&self.plan)
    }

    /// Replaces the plan with an envelope's contents.
    ///
    /// On failure the plan is untouched and an error notice is shown.
    pub fn import_json(&mut self, text: &str, now: Instant) -> Result<(), ImportError> {
        self.accept_import(parser::decode(text), "clipboard text", now)
    }

    /// Replaces the plan with a plan file's contents.
    ///
    /// On failure the plan is untouched and an error notice is shown.
    pub fn import_file(&mut self, path: &Path, now: Instant) -> Result<(), ImportError> {
        let source = path.display().to_string();
        self.accept_import(PlanService::read(path), &source, now)
    }

    fn accept_import(
        &mut self,
        result: Result<Plan, ImportError>,
        source: &str,
        now: Instant,
    ) -> Result<(), ImportError> {
        match result {
            Ok(plan) => {
                self.commit(PlanEdit::Replace(plan));
                self.clear_selection();
                tracing::info!(source, "plan imported");
                self.notify("Plan imported", NoticeKind::Info, now);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(source, error = %err, "import rejected");
                self.notify(format!("Import failed: {err}"), NoticeKind::Error, now);
                Err(err)
            }
        }
    }

    // === Notices ===

    /// Shows a notice, replacing any current one.
    pub fn notify(&mut self, text: impl Into<String>, kind: NoticeKind, now: Instant) {
        self.notice = Some(Notice::new(text, kind, now));
    }

    /// The notice to show at `now`, if any.
    #[must_use]
    pub fn active_notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_active(now))
    }

    /// Drops an expired notice. Returns `true` if one was dropped.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.notice.as_ref().is_some_and(|n| !n.is_active(now)) {
            self.notice = None;
            return true;
        }
        false
    }

    // === Internals ===

    fn hit(&self, point: GridPoint) -> Option<Selection> {
        match self.mode {
            EditMode::Rooms => self
                .plan
                .room_at(self.floor, point)
                .map(|room| Selection::Room(room.id.clone())),
            EditMode::Doors => self
                .plan
                .door_near(self.floor, point, DOOR_HIT_TOLERANCE)
                .map(|door| Selection::Door(door.id.clone())),
        }
    }

    fn commit(&mut self, edit: PlanEdit) -> bool {
        let before = self.plan.revision();
        self.plan = std::mem::take(&mut self.plan).apply(edit);
        if self.plan.revision() == before {
            return false;
        }

        let selection_alive = match &self.selection {
            Some(Selection::Room(id)) => self.plan.room(self.floor, id).is_some(),
            Some(Selection::Door(id)) => self.plan.door(self.floor, id).is_some(),
            None => true,
        };
        if !selection_alive {
            self.clear_selection();
        }

        self.autosave();
        true
    }

    fn autosave(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.plan) {
                tracing::warn!(error = %format!("{err:#}"), "autosave failed");
            }
        }
    }
}
