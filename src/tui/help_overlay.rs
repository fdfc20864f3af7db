//! Help overlay listing every keybinding context.
//!
//! Content comes from the [`HelpRegistry`], so the overlay and the status
//! bar never disagree about what a key does.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use super::component::{Component, ComponentEvent};
use super::help_registry::{contexts, HelpRegistry};
use super::Theme;

const KEY_COLUMN_WIDTH: usize = 22;

/// State for the help overlay.
#[derive(Debug, Clone)]
pub struct HelpOverlayState {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    registry: HelpRegistry,
    total_lines: usize,
}

impl HelpOverlayState {
    /// Creates a new help overlay state.
    #[must_use]
    pub fn new() -> Self {
        let registry = HelpRegistry::default();
        let total_lines = Self::help_content(&registry, &Theme::dark()).len();
        Self {
            scroll_offset: 0,
            registry,
            total_lines,
        }
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub const fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines {
            self.scroll_offset += 1;
        }
    }

    /// Scroll to the top.
    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll to the bottom.
    pub const fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.total_lines.saturating_sub(1);
    }

    fn help_content(registry: &HelpRegistry, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} - Help", registry.app_name()),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for name in contexts::ALL {
            let Some(context) = registry.get_context(name) else {
                continue;
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("═══ {} ═══", context.name.to_uppercase()),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", context.description),
                    Style::default().fg(theme.text_muted),
                ),
            ]));
            for binding in registry.get_bindings(name) {
                let (keys, action) = HelpRegistry::format_binding_for_help(binding);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {keys:<KEY_COLUMN_WIDTH$}"),
                        Style::default().fg(theme.success),
                    ),
                    Span::styled(action, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Press '?' to close help • Press ↑↓ to scroll",
            Style::default().fg(theme.text_muted),
        )));
        lines
    }
}

impl Default for HelpOverlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlayState {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),
            KeyCode::Esc | KeyCode::Char('?' | 'q') => return Some(ComponentEvent::Closed),
            _ => {}
        }
        None
    }

    /// Render the help overlay as a centered modal.
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let modal_area = super::centered_rect(70, 80, area);
        frame.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let content_area = chunks[0];
        let scrollbar_area = chunks[1];

        let content = Self::help_content(&self.registry, theme);
        let visible_height = content_area.height.saturating_sub(2) as usize;
        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.surface)),
            )
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(self.scroll_offset).unwrap_or(u16::MAX), 0));

        frame.render_widget(paragraph, content_area);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(theme.primary));

        let mut scrollbar_state =
            ScrollbarState::new(self.total_lines.saturating_sub(visible_height))
                .position(self.scroll_offset);

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_content_lists_all_contexts() {
        let registry = HelpRegistry::load().unwrap();
        let text: String = HelpOverlayState::help_content(&registry, &Theme::dark())
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("CANVAS"));
        assert!(text.contains("PROPERTIES FORM"));
        assert!(text.contains("Rotate selected room"));
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut state = HelpOverlayState::new();
        state.scroll_up();
        assert_eq!(state.scroll_offset, 0);

        state.scroll_to_bottom();
        let bottom = state.scroll_offset;
        state.scroll_down();
        assert_eq!(state.scroll_offset, bottom);

        state.handle_input(key(KeyCode::Home));
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_close_keys() {
        let mut state = HelpOverlayState::new();
        assert_eq!(state.handle_input(key(KeyCode::Down)), None);
        assert_eq!(
            state.handle_input(key(KeyCode::Esc)),
            Some(ComponentEvent::Closed)
        );
        assert_eq!(
            state.handle_input(key(KeyCode::Char('?'))),
            Some(ComponentEvent::Closed)
        );
    }
}
