// Popup management action handlers

use crate::tui::{AppState, PopupType};
use anyhow::Result;

/// Handle edit-selected action: opens the form for the selected room or door
pub fn handle_edit_selected(state: &mut AppState) -> Result<bool> {
    if !state.open_entity_form() {
        state.set_status("Select a room or door first");
    }
    Ok(false)
}

/// Handle toggle help action
pub fn handle_toggle_help(state: &mut AppState) -> Result<bool> {
    if state.active_popup == Some(PopupType::HelpOverlay) {
        state.close_component();
    } else {
        state.open_help_overlay();
    }
    Ok(false)
}
