//! Component trait pattern for TUI components.
//!
//! This module defines the traits and types used to implement self-contained,
//! testable TUI components that can handle their own input and rendering.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;

use crate::models::{DoorPatch, RoomPatch};
use crate::tui::Theme;

/// A component that can be rendered and handle input.
///
/// Components are self-contained UI elements that manage their own state,
/// handle keyboard input, and can emit events to communicate with the parent.
pub trait Component {
    /// Event type this component can emit
    type Event;

    /// Handle keyboard input.
    ///
    /// Returns `Some(Event)` if the component wants to signal something to the parent.
    /// Returns `None` if input was handled internally without needing parent action.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Render the component within the provided area.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);

    /// Check if component should close.
    fn should_close(&self) -> bool {
        false
    }
}

/// What a path prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPromptKind {
    /// Destination of an export
    Export,
    /// Source of an import
    Import,
}

/// Events that can be emitted by popup components.
///
/// These events are processed by the parent (`AppState`) to update the
/// editor or trigger file operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentEvent {
    /// Room form was applied
    RoomEdited(RoomPatch),

    /// Door form was applied
    DoorEdited(DoorPatch),

    /// A path was confirmed in a prompt
    PathChosen {
        /// What the path is for
        kind: PathPromptKind,
        /// The entered path
        path: PathBuf,
    },

    /// User cancelled without making changes
    Cancelled,

    /// Component closed naturally (e.g., help overlay dismissed)
    Closed,
}
