//! Centralized shortcut and action system.
//!
//! This module provides a unified system for keyboard shortcuts and actions,
//! connecting help text definitions with actual event handling logic.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// All possible actions on the main canvas.
///
/// This enum represents every action a user can take. It serves as the
/// bridge between keyboard shortcuts and application behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === CURSOR / NUDGE ===
    /// Move the selection (or the cursor) up
    MoveUp,
    /// Move the selection (or the cursor) down
    MoveDown,
    /// Move the selection (or the cursor) left
    MoveLeft,
    /// Move the selection (or the cursor) right
    MoveRight,

    // === RESIZE ===
    /// Widen the selected room
    GrowWidth,
    /// Narrow the selected room
    ShrinkWidth,
    /// Make the selected room taller
    GrowHeight,
    /// Make the selected room shorter
    ShrinkHeight,
    /// Swap the selected room's width and height
    Rotate,

    // === ENTITIES ===
    /// Select whatever is under the cursor
    SelectAtCursor,
    /// Add a room or door at the cursor
    AddAtCursor,
    /// Delete the selection
    DeleteSelected,
    /// Open the form for the selection
    EditSelected,

    // === FLOORS & MODES ===
    /// Switch to the other floor
    SwitchFloor,
    /// Show floor 1
    ShowFirstFloor,
    /// Show floor 2
    ShowSecondFloor,
    /// Toggle between room and door editing
    ToggleMode,

    // === FILE OPERATIONS ===
    /// Export the plan to a file
    Export,
    /// Import a plan file
    Import,
    /// Copy the exported JSON to the clipboard
    CopyJson,
    /// Leave the editor
    Quit,

    // === HELP ===
    /// Show or hide the help overlay
    ToggleHelp,

    // === GENERAL ===
    /// Drop the selection
    Cancel,
}

impl Action {
    /// Get the action ID string used in help.toml
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::MoveLeft => "move_left",
            Self::MoveRight => "move_right",

            Self::GrowWidth => "grow_width",
            Self::ShrinkWidth => "shrink_width",
            Self::GrowHeight => "grow_height",
            Self::ShrinkHeight => "shrink_height",
            Self::Rotate => "rotate",

            Self::SelectAtCursor => "select",
            Self::AddAtCursor => "add",
            Self::DeleteSelected => "delete",
            Self::EditSelected => "edit",

            Self::SwitchFloor => "switch_floor",
            Self::ShowFirstFloor => "floor_1",
            Self::ShowSecondFloor => "floor_2",
            Self::ToggleMode => "toggle_mode",

            Self::Export => "export",
            Self::Import => "import",
            Self::CopyJson => "copy_json",
            Self::Quit => "quit",

            Self::ToggleHelp => "toggle_help",

            Self::Cancel => "cancel",
        }
    }
}

/// Shortcut registry that maps key events to actions for a given context.
///
/// This is the central source of truth for all keyboard shortcuts in the application.
pub struct ShortcutRegistry {
    /// Maps (context, key binding) to Action
    bindings: HashMap<(String, KeyBinding), Action>,
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Modifier keys
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a `KeyEvent`.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_main_shortcuts();
        registry
    }

    /// Register all shortcuts for the main context.
    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = "main";

        // === CURSOR / NUDGE ===
        self.register(ctx, K::Up, M::NONE, Action::MoveUp);
        self.register(ctx, K::Down, M::NONE, Action::MoveDown);
        self.register(ctx, K::Left, M::NONE, Action::MoveLeft);
        self.register(ctx, K::Right, M::NONE, Action::MoveRight);
        self.register(ctx, K::Char('k'), M::NONE, Action::MoveUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::MoveDown);
        self.register(ctx, K::Char('h'), M::NONE, Action::MoveLeft);
        self.register(ctx, K::Char('l'), M::NONE, Action::MoveRight);

        // === RESIZE ===
        self.register(ctx, K::Right, M::SHIFT, Action::GrowWidth);
        self.register(ctx, K::Left, M::SHIFT, Action::ShrinkWidth);
        self.register(ctx, K::Down, M::SHIFT, Action::GrowHeight);
        self.register(ctx, K::Up, M::SHIFT, Action::ShrinkHeight);
        self.register(ctx, K::Char('L'), M::SHIFT, Action::GrowWidth);
        self.register(ctx, K::Char('H'), M::SHIFT, Action::ShrinkWidth);
        self.register(ctx, K::Char('J'), M::SHIFT, Action::GrowHeight);
        self.register(ctx, K::Char('K'), M::SHIFT, Action::ShrinkHeight);
        self.register(ctx, K::Char('r'), M::NONE, Action::Rotate);

        // === ENTITIES ===
        self.register(ctx, K::Char(' '), M::NONE, Action::SelectAtCursor);
        self.register(ctx, K::Char('a'), M::NONE, Action::AddAtCursor);
        self.register(ctx, K::Char('x'), M::NONE, Action::DeleteSelected);
        self.register(ctx, K::Delete, M::NONE, Action::DeleteSelected);
        self.register(ctx, K::Enter, M::NONE, Action::EditSelected);

        // === FLOORS & MODES ===
        self.register(ctx, K::Tab, M::NONE, Action::SwitchFloor);
        self.register(ctx, K::BackTab, M::SHIFT, Action::SwitchFloor);
        self.register(ctx, K::Char('1'), M::NONE, Action::ShowFirstFloor);
        self.register(ctx, K::Char('2'), M::NONE, Action::ShowSecondFloor);
        self.register(ctx, K::Char('m'), M::NONE, Action::ToggleMode);

        // === FILE OPERATIONS ===
        self.register(ctx, K::Char('e'), M::NONE, Action::Export);
        self.register(ctx, K::Char('i'), M::NONE, Action::Import);
        self.register(ctx, K::Char('y'), M::NONE, Action::CopyJson);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);

        // === HELP ===
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Char('?'), M::SHIFT, Action::ToggleHelp);

        // === GENERAL ===
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }

    /// Check if a key event matches a specific action in the given context.
    #[must_use]
    pub fn matches(&self, context: &str, event: KeyEvent, action: Action) -> bool {
        self.lookup(context, event) == Some(action)
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_basic_lookup() {
        let registry = ShortcutRegistry::new();

        assert_eq!(
            registry.lookup("main", key(KeyCode::Up, KeyModifiers::NONE)),
            Some(Action::MoveUp)
        );
        assert_eq!(
            registry.lookup("main", key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Action::SwitchFloor)
        );
        assert_eq!(
            registry.lookup("main", key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_shift_arrows_resize() {
        let registry = ShortcutRegistry::new();
        assert!(registry.matches(
            "main",
            key(KeyCode::Right, KeyModifiers::SHIFT),
            Action::GrowWidth
        ));
        assert!(registry.matches(
            "main",
            key(KeyCode::Char('K'), KeyModifiers::SHIFT),
            Action::ShrinkHeight
        ));
    }

    #[test]
    fn test_vim_navigation() {
        let registry = ShortcutRegistry::new();
        for (c, action) in [
            ('h', Action::MoveLeft),
            ('j', Action::MoveDown),
            ('k', Action::MoveUp),
            ('l', Action::MoveRight),
        ] {
            assert_eq!(
                registry.lookup("main", key(KeyCode::Char(c), KeyModifiers::NONE)),
                Some(action)
            );
        }
    }

    #[test]
    fn test_unknown_context_has_no_bindings() {
        let registry = ShortcutRegistry::new();
        assert_eq!(
            registry.lookup("form", key(KeyCode::Up, KeyModifiers::NONE)),
            None
        );
    }
}
