//! Action dispatch: maps every shortcut action to its handler.

use anyhow::Result;

use crate::models::Floor;
use crate::shortcuts::Action;
use crate::tui::AppState;

use super::action_handlers::{entities, file_ops, navigation, popups};

/// Dispatch an action to its handler.
///
/// Returns `Ok(true)` when the application should quit.
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    tracing::trace!(?action, "dispatching action");
    match action {
        // Movement (4 actions)
        Action::MoveUp => navigation::handle_move(state, 0, -1),
        Action::MoveDown => navigation::handle_move(state, 0, 1),
        Action::MoveLeft => navigation::handle_move(state, -1, 0),
        Action::MoveRight => navigation::handle_move(state, 1, 0),

        // Resize and rotate (5 actions)
        Action::GrowWidth => entities::handle_resize(state, 1, 0),
        Action::ShrinkWidth => entities::handle_resize(state, -1, 0),
        Action::GrowHeight => entities::handle_resize(state, 0, 1),
        Action::ShrinkHeight => entities::handle_resize(state, 0, -1),
        Action::Rotate => entities::handle_rotate(state),

        // Entities (4 actions)
        Action::SelectAtCursor => entities::handle_select(state),
        Action::AddAtCursor => entities::handle_add(state),
        Action::DeleteSelected => entities::handle_delete(state),
        Action::EditSelected => popups::handle_edit_selected(state),

        // Floors and mode (4 actions)
        Action::SwitchFloor => navigation::handle_switch_floor(state),
        Action::ShowFirstFloor => navigation::handle_show_floor(state, Floor::First),
        Action::ShowSecondFloor => navigation::handle_show_floor(state, Floor::Second),
        Action::ToggleMode => navigation::handle_toggle_mode(state),

        // File operations (4 actions)
        Action::Export => file_ops::handle_export(state),
        Action::Import => file_ops::handle_import(state),
        Action::CopyJson => file_ops::handle_copy_json(state),
        Action::Quit => file_ops::handle_quit(state),

        // Overlays (2 actions)
        Action::ToggleHelp => popups::handle_toggle_help(state),
        Action::Cancel => navigation::handle_cancel(state),
    }
}
