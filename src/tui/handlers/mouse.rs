//! Mouse input: click to select or place, drag to move.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::editor::EditMode;
use crate::services::geometry::{pointer_to_grid, CanvasBounds, GridPoint, GRID_H, GRID_W};
use crate::tui::AppState;

/// Handle a mouse event against the canvas measured in `bounds`.
///
/// `bounds` is `None` when the terminal is too small to hold the grid; a
/// press is then ignored and a drag maps to the origin.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent, bounds: Option<&CanvasBounds>) {
    // Release ends a drag even when a popup opened mid-drag
    if let MouseEventKind::Up(_) = mouse.kind {
        if state.editor.end_drag() {
            tracing::debug!("drag ended");
        }
        return;
    }

    if state.active_popup.is_some() {
        return;
    }

    let point = pointer_to_grid(f64::from(mouse.column), f64::from(mouse.row), bounds);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if bounds.is_none() || !on_grid(point) {
                return;
            }
            handle_press(state, point);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            state.editor.drag_to(point);
        }
        _ => {}
    }
}

fn handle_press(state: &mut AppState, point: GridPoint) {
    let (cx, cy) = point.cell();
    state.cursor = (cx.clamp(0, GRID_W - 1), cy.clamp(0, GRID_H - 1));

    if state.editor.begin_drag(point) {
        return;
    }

    // Empty space: place a door, or just drop the selection
    if state.editor.mode() == EditMode::Doors {
        state.editor.add_door_at(point);
    }
}

fn on_grid(point: GridPoint) -> bool {
    (0.0..=f64::from(GRID_W)).contains(&point.x) && (0.0..=f64::from(GRID_H)).contains(&point.y)
}
