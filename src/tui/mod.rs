//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod canvas;
pub mod component;
pub mod entity_form;
pub mod handlers;
pub mod help_overlay;
pub mod help_registry;
pub mod inspector;
pub mod path_prompt;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::editor::{Editor, NoticeKind, Selection};
use crate::services::geometry::{CanvasBounds, GridPoint, CELL_COLS, CELL_ROWS, GRID_H, GRID_W};

// Re-export TUI components
pub use canvas::{CanvasWidget, CANVAS_COLS, CANVAS_ROWS};
pub use component::{Component, ComponentEvent, PathPromptKind};
pub use entity_form::{DoorFormState, RoomFormState};
pub use help_overlay::HelpOverlayState;
pub use inspector::Inspector;
pub use path_prompt::PathPromptState;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Popup types that can be displayed over the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Room or door form
    EntityForm,
    /// Export/import path prompt
    PathPrompt,
    /// Help overlay popup
    HelpOverlay,
}

/// Active component - holds the currently active popup component
///
/// Only one component can be active at a time.
#[derive(Debug)]
pub enum ActiveComponent {
    /// Room form component
    RoomForm(RoomFormState),
    /// Door form component
    DoorForm(DoorFormState),
    /// Path prompt component
    PathPrompt(PathPromptState),
    /// Help overlay component
    HelpOverlay(HelpOverlayState),
}

/// Screen regions of the main UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title bar
    pub title: Rect,
    /// Everything between title and status bar
    pub main: Rect,
    /// Grid canvas, including its border
    pub canvas: Rect,
    /// Inspector panel right of the canvas
    pub inspector: Rect,
    /// Status bar
    pub status: Rect,
}

impl ScreenLayout {
    /// Whether the whole grid fits inside the canvas.
    #[must_use]
    pub const fn canvas_fits(&self) -> bool {
        self.canvas.width >= CANVAS_COLS + 2 && self.canvas.height >= CANVAS_ROWS + 2
    }
}

/// Splits the terminal area into the main UI regions.
#[must_use]
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Canvas + inspector
            Constraint::Length(4), // Status bar (notice + hints)
        ])
        .split(area);

    let columns = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(CANVAS_COLS + 2), Constraint::Min(0)])
        .split(rows[1]);

    let canvas = Rect {
        height: columns[0].height.min(CANVAS_ROWS + 2),
        ..columns[0]
    };

    ScreenLayout {
        title: rows[0],
        main: rows[1],
        canvas,
        inspector: columns[1],
        status: rows[2],
    }
}

/// Measures where grid cell (0, 0) sits on screen.
///
/// Returns `None` when the terminal is too small to show the whole grid.
#[must_use]
pub fn canvas_bounds(area: Rect) -> Option<CanvasBounds> {
    let layout = screen_layout(area);
    if !layout.canvas_fits() {
        return None;
    }
    Some(CanvasBounds::new(
        f64::from(layout.canvas.x + 1),
        f64::from(layout.canvas.y + 1),
        f64::from(CELL_COLS),
        f64::from(CELL_ROWS),
    ))
}

/// Application state - single source of truth
///
/// All UI components read from this state immutably.
/// Only event handlers modify state explicitly.
pub struct AppState {
    // Core data
    /// Editing session over the plan
    pub editor: Editor,

    // UI state
    /// Keyboard cursor, in grid cells
    pub cursor: (i32, i32),
    /// Active popup
    pub active_popup: Option<PopupType>,
    /// Component backing the active popup
    pub active_component: Option<ActiveComponent>,
    /// Set when the main loop should exit
    pub should_quit: bool,

    // Configuration
    /// Application configuration
    pub config: Config,
    /// Current theme
    pub theme: Theme,
}

impl AppState {
    /// Creates a new `AppState` around an editing session.
    #[must_use]
    pub fn new(editor: Editor, config: Config) -> Self {
        let theme = Theme::from_mode(config.ui.theme_mode);
        let show_help = config.ui.show_help_on_startup;

        let mut state = Self {
            editor,
            cursor: (0, 0),
            active_popup: None,
            active_component: None,
            should_quit: false,
            config,
            theme,
        };

        if show_help {
            state.open_help_overlay();
        }
        state
    }

    /// Shows an informational notice in the status bar.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.editor.notify(message, NoticeKind::Info, Instant::now());
    }

    /// Shows an error notice in the status bar.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.editor.notify(message, NoticeKind::Error, Instant::now());
    }

    /// Moves the keyboard cursor, staying on the grid.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let (x, y) = self.cursor;
        self.cursor = ((x + dx).clamp(0, GRID_W - 1), (y + dy).clamp(0, GRID_H - 1));
    }

    /// The cursor cell's top-left corner as a grid point.
    #[must_use]
    pub fn cursor_point(&self) -> GridPoint {
        let (x, y) = self.cursor;
        GridPoint::new(f64::from(x), f64::from(y))
    }

    // === Component Management ===

    /// Open the form for the selected room or door.
    ///
    /// Returns `false` when nothing is selected.
    pub fn open_entity_form(&mut self) -> bool {
        let component = match self.editor.selection() {
            Some(Selection::Room(_)) => self
                .editor
                .selected_room()
                .map(|room| ActiveComponent::RoomForm(RoomFormState::new(room))),
            Some(Selection::Door(_)) => self
                .editor
                .selected_door()
                .map(|door| ActiveComponent::DoorForm(DoorFormState::new(door))),
            None => None,
        };

        let Some(component) = component else {
            return false;
        };
        self.active_component = Some(component);
        self.active_popup = Some(PopupType::EntityForm);
        true
    }

    /// Open the export/import path prompt
    pub fn open_path_prompt(&mut self, kind: PathPromptKind, initial: String) {
        let prompt = PathPromptState::new(kind, initial);
        self.active_component = Some(ActiveComponent::PathPrompt(prompt));
        self.active_popup = Some(PopupType::PathPrompt);
    }

    /// Open the help overlay component
    pub fn open_help_overlay(&mut self) {
        let help = HelpOverlayState::new();
        self.active_component = Some(ActiveComponent::HelpOverlay(help));
        self.active_popup = Some(PopupType::HelpOverlay);
    }

    /// Close the currently active component
    pub fn close_component(&mut self) {
        self.active_component = None;
        self.active_popup = None;
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Expire the transient notice
        state.editor.tick(Instant::now());

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => {
                    // Bounds are measured fresh for every pointer event
                    let (width, height) = crossterm::terminal::size()?;
                    let bounds = canvas_bounds(Rect::new(0, 0, width, height));
                    handlers::handle_mouse_event(state, mouse, bounds.as_ref());
                }
                // Terminal resized, will re-render on next loop
                _ => {}
            }
        }

        // Check if should quit
        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    // This ensures consistent background regardless of terminal settings
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let layout = screen_layout(f.area());

    render_title_bar(f, layout.title, state);

    if layout.canvas_fits() {
        CanvasWidget::render(f, layout.canvas, state);
        Inspector::render(f, layout.inspector, state);
    } else {
        render_too_small(f, layout.main, &state.theme);
    }

    StatusBar::render(f, layout.status, state, &state.theme);

    // Render popup if active
    if let Some(popup_type) = &state.active_popup {
        render_popup(f, *popup_type, state);
    }
}

/// Render title bar with floor, mode and area
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let editor = &state.editor;
    let title = format!(
        " {APP_NAME} - {} - {} mode - area {:.1}",
        editor.floor(),
        editor.mode().label(),
        editor.area()
    );

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Shown in place of the canvas when the grid cannot fit
fn render_too_small(f: &mut Frame, area: Rect, theme: &Theme) {
    let needed = format!(
        "Needs at least {}x{} cells for the grid",
        CANVAS_COLS + 2,
        CANVAS_ROWS + 2 + 7
    );
    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(needed, Style::default().fg(theme.text_muted))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(message, area);
}

/// Render active popup
fn render_popup(f: &mut Frame, popup_type: PopupType, state: &AppState) {
    match (popup_type, &state.active_component) {
        (PopupType::EntityForm, Some(ActiveComponent::RoomForm(form))) => {
            form.render(f, f.area(), &state.theme);
        }
        (PopupType::EntityForm, Some(ActiveComponent::DoorForm(form))) => {
            form.render(f, f.area(), &state.theme);
        }
        (PopupType::PathPrompt, Some(ActiveComponent::PathPrompt(prompt))) => {
            prompt.render(f, f.area(), &state.theme);
        }
        (PopupType::HelpOverlay, Some(ActiveComponent::HelpOverlay(help))) => {
            help.render(f, f.area(), &state.theme);
        }
        _ => {}
    }
}

/// Helper to create a centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events
fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    // Ignore release/repeat events reported by some terminals
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }

    // Route to popup handler if popup is active
    if state.active_popup.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    // Main UI key handling
    handlers::handle_main_input(state, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;
    use crate::editor::EditMode;
    use crate::models::Floor;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::backend::TestBackend;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    fn test_state() -> AppState {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        AppState::new(Editor::default(), config)
    }

    fn press(state: &mut AppState, code: KeyCode) -> bool {
        handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn mouse(state: &mut AppState, kind: MouseEventKind, column: u16, row: u16) {
        let event = MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        let bounds = canvas_bounds(SCREEN);
        handlers::handle_mouse_event(state, event, bounds.as_ref());
    }

    #[test]
    fn test_screen_layout_regions() {
        let layout = screen_layout(SCREEN);
        assert_eq!(layout.title.height, 3);
        assert_eq!(layout.status.height, 4);
        assert_eq!(layout.canvas, Rect::new(0, 3, CANVAS_COLS + 2, CANVAS_ROWS + 2));
        assert_eq!(layout.inspector.x, CANVAS_COLS + 2);
        assert!(layout.canvas_fits());
    }

    #[test]
    fn test_canvas_bounds_inside_border() {
        let bounds = canvas_bounds(SCREEN).unwrap();
        assert_eq!(bounds, CanvasBounds::new(1.0, 4.0, 4.0, 2.0));
    }

    #[test]
    fn test_canvas_bounds_none_when_too_small() {
        assert!(canvas_bounds(Rect::new(0, 0, 40, 40)).is_none());
        assert!(canvas_bounds(Rect::new(0, 0, 100, 20)).is_none());
    }

    #[test]
    fn test_render_does_not_panic_on_small_terminal() {
        let state = test_state();
        for (w, h) in [(100, 40), (30, 12)] {
            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            terminal.draw(|f| render(f, &state)).unwrap();
        }
    }

    #[test]
    fn test_cursor_stays_on_grid() {
        let mut state = test_state();
        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Up);
        assert_eq!(state.cursor, (0, 0));

        for _ in 0..30 {
            press(&mut state, KeyCode::Right);
            press(&mut state, KeyCode::Down);
        }
        assert_eq!(state.cursor, (GRID_W - 1, GRID_H - 1));
    }

    #[test]
    fn test_add_room_then_nudge_with_arrows() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.editor.rooms().len(), 1);

        press(&mut state, KeyCode::Right);
        let room = state.editor.selected_room().unwrap();
        assert_eq!((room.x, room.y), (1, 0));
        // The cursor stays put while something is selected
        assert_eq!(state.cursor, (0, 0));
    }

    #[test]
    fn test_mode_and_floor_keys() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('m'));
        assert_eq!(state.editor.mode(), EditMode::Doors);

        press(&mut state, KeyCode::Tab);
        assert_eq!(state.editor.floor(), Floor::Second);
        press(&mut state, KeyCode::Char('1'));
        assert_eq!(state.editor.floor(), Floor::First);
    }

    #[test]
    fn test_edit_form_opens_and_cancels() {
        let mut state = test_state();
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.active_popup, None);

        press(&mut state, KeyCode::Char('a'));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.active_popup, Some(PopupType::EntityForm));
        assert!(matches!(
            state.active_component,
            Some(ActiveComponent::RoomForm(_))
        ));

        // Keys go to the form, not the main shortcuts
        press(&mut state, KeyCode::Char('q'));
        assert!(!state.should_quit);

        press(&mut state, KeyCode::Esc);
        assert_eq!(state.active_popup, None);
        assert!(state.active_component.is_none());
    }

    #[test]
    fn test_help_toggle() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.active_popup, None);
    }

    #[test]
    fn test_quit_key() {
        let mut state = test_state();
        assert!(press(&mut state, KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut state = test_state();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(!handle_key_event(&mut state, key).unwrap());
        assert!(state.editor.rooms().is_empty());
    }

    #[test]
    fn test_mouse_drag_moves_room() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('a'));
        state.editor.clear_selection();

        // Screen (6, 7) is grid (1.25, 1.5), inside the 3x3 room at the origin
        mouse(&mut state, MouseEventKind::Down(MouseButton::Left), 6, 7);
        assert!(state.editor.drag().is_some());
        assert!(state.editor.selected_room().is_some());
        assert_eq!(state.cursor, (1, 1));

        mouse(&mut state, MouseEventKind::Drag(MouseButton::Left), 14, 11);
        mouse(&mut state, MouseEventKind::Up(MouseButton::Left), 90, 39);
        assert!(state.editor.drag().is_none());

        let room = &state.editor.rooms()[0];
        assert_eq!((room.x, room.y), (2, 2));
    }

    #[test]
    fn test_mouse_click_places_door_in_door_mode() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('m'));

        // Screen (9, 8) is grid (2.0, 2.0)
        mouse(&mut state, MouseEventKind::Down(MouseButton::Left), 9, 8);
        assert_eq!(state.editor.doors().len(), 1);
        let door = &state.editor.doors()[0];
        assert_eq!((door.x, door.y), (2.0, 2.0));
    }

    #[test]
    fn test_mouse_click_on_empty_room_space_clears_selection() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('a'));
        assert!(state.editor.selection().is_some());

        mouse(&mut state, MouseEventKind::Down(MouseButton::Left), 41, 20);
        assert!(state.editor.selection().is_none());
        assert_eq!(state.editor.rooms().len(), 1);
    }

    #[test]
    fn test_mouse_outside_grid_and_under_popup_is_ignored() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('m'));

        // Inspector area
        mouse(&mut state, MouseEventKind::Down(MouseButton::Left), 80, 10);
        assert!(state.editor.doors().is_empty());

        state.open_help_overlay();
        mouse(&mut state, MouseEventKind::Down(MouseButton::Left), 9, 8);
        assert!(state.editor.doors().is_empty());
    }

    #[test]
    fn test_mouse_release_under_popup_ends_drag() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('a'));
        state.editor.clear_selection();

        mouse(&mut state, MouseEventKind::Down(MouseButton::Left), 6, 7);
        assert!(state.editor.drag().is_some());

        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));

        mouse(&mut state, MouseEventKind::Drag(MouseButton::Left), 14, 11);
        mouse(&mut state, MouseEventKind::Up(MouseButton::Left), 6, 7);
        assert!(state.editor.drag().is_none());

        let room = &state.editor.rooms()[0];
        assert_eq!((room.x, room.y), (0, 0));
    }
}
