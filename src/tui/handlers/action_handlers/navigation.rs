// Cursor, floor and mode action handlers

use crate::editor::EditMode;
use crate::models::Floor;
use crate::tui::AppState;
use anyhow::Result;

/// Handle a directional move: nudges the selection if there is one,
/// otherwise moves the keyboard cursor.
pub fn handle_move(state: &mut AppState, dx: i32, dy: i32) -> Result<bool> {
    if state.editor.selection().is_some() {
        if !state.editor.nudge_selected(dx, dy) {
            tracing::debug!(dx, dy, "nudge ignored at boundary");
        }
    } else {
        state.move_cursor(dx, dy);
    }
    Ok(false)
}

/// Handle switch floor action
pub fn handle_switch_floor(state: &mut AppState) -> Result<bool> {
    let next = state.editor.floor().other();
    handle_show_floor(state, next)
}

/// Handle show floor action
pub fn handle_show_floor(state: &mut AppState, floor: Floor) -> Result<bool> {
    if state.editor.floor() != floor {
        state.editor.switch_floor(floor);
        state.set_status(format!("{floor}"));
    }
    Ok(false)
}

/// Handle toggle mode action
pub fn handle_toggle_mode(state: &mut AppState) -> Result<bool> {
    let mode = state.editor.mode().toggled();
    state.editor.set_mode(mode);
    state.set_status(match mode {
        EditMode::Rooms => "Room mode",
        EditMode::Doors => "Door mode - click to place doors",
    });
    Ok(false)
}

/// Handle cancel action
pub fn handle_cancel(state: &mut AppState) -> Result<bool> {
    if state.editor.selection().is_some() {
        state.editor.clear_selection();
    }
    Ok(false)
}
