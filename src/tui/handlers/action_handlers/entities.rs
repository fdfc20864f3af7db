// Room and door action handlers

use crate::tui::AppState;
use anyhow::Result;

/// Handle select-at-cursor action
pub fn handle_select(state: &mut AppState) -> Result<bool> {
    let point = state.cursor_point();
    if state.editor.select_at(point).is_none() {
        state.set_status("Nothing here");
    }
    Ok(false)
}

/// Handle add-at-cursor action
pub fn handle_add(state: &mut AppState) -> Result<bool> {
    let point = state.cursor_point();
    state.editor.add_at(point);
    Ok(false)
}

/// Handle delete action
pub fn handle_delete(state: &mut AppState) -> Result<bool> {
    if state.editor.delete_selected() {
        state.set_status("Deleted");
    }
    Ok(false)
}

/// Handle resize action. Out-of-bounds requests are dropped silently.
pub fn handle_resize(state: &mut AppState, dw: i32, dh: i32) -> Result<bool> {
    state.editor.resize_selected(dw, dh);
    Ok(false)
}

/// Handle rotate action. Out-of-bounds requests are dropped silently.
pub fn handle_rotate(state: &mut AppState) -> Result<bool> {
    state.editor.rotate_selected();
    Ok(false)
}
