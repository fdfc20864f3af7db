//! Popup input handlers.
//!
//! The active component consumes the key; whatever event it emits is
//! applied to the editor here.

use anyhow::Result;
use crossterm::event::{self, KeyCode};

use crate::tui::component::{Component, ComponentEvent, PathPromptKind};
use crate::tui::{ActiveComponent, AppState};

use super::action_handlers::file_ops;

/// Handle input for whichever popup is open
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let event = match state.active_component {
        Some(ActiveComponent::RoomForm(ref mut form)) => form.handle_input(key),
        Some(ActiveComponent::DoorForm(ref mut form)) => form.handle_input(key),
        Some(ActiveComponent::PathPrompt(ref mut prompt)) => prompt.handle_input(key),
        Some(ActiveComponent::HelpOverlay(ref mut help)) => help.handle_input(key),
        None => {
            // Popup without a component: Escape closes it
            if key.code == KeyCode::Esc {
                state.close_component();
            }
            return Ok(false);
        }
    };

    if let Some(event) = event {
        handle_component_event(state, event);
    }
    Ok(false)
}

/// Apply an event emitted by a popup component.
pub fn handle_component_event(state: &mut AppState, event: ComponentEvent) {
    match event {
        ComponentEvent::RoomEdited(patch) => {
            state.close_component();
            if state.editor.update_selected_room(patch) {
                state.set_status("Room updated");
            }
        }
        ComponentEvent::DoorEdited(patch) => {
            state.close_component();
            if state.editor.update_selected_door(patch) {
                state.set_status("Door updated");
            }
        }
        ComponentEvent::PathChosen { kind, path } => {
            state.close_component();
            match kind {
                PathPromptKind::Export => file_ops::perform_export(state, &path),
                PathPromptKind::Import => file_ops::perform_import(state, &path),
            }
        }
        ComponentEvent::Cancelled => {
            state.close_component();
            state.set_status("Cancelled");
        }
        ComponentEvent::Closed => state.close_component(),
    }
}
