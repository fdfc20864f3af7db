//! Single-line path prompt used by export and import.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::PathBuf;

use super::component::{Component, ComponentEvent, PathPromptKind};
use super::Theme;

/// State for the path prompt.
#[derive(Debug, Clone)]
pub struct PathPromptState {
    /// What the path is for
    pub kind: PathPromptKind,
    /// Entered text
    pub input: String,
    /// Last validation error
    pub error: Option<String>,
}

impl PathPromptState {
    /// Creates a prompt prefilled with `initial`.
    #[must_use]
    pub fn new(kind: PathPromptKind, initial: impl Into<String>) -> Self {
        Self {
            kind,
            input: initial.into(),
            error: None,
        }
    }

    const fn title(&self) -> &'static str {
        match self.kind {
            PathPromptKind::Export => " Export Plan To ",
            PathPromptKind::Import => " Import Plan From ",
        }
    }
}

impl Component for PathPromptState {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                let path = self.input.trim();
                if path.is_empty() {
                    self.error = Some("Path cannot be empty".to_string());
                    return None;
                }
                return Some(ComponentEvent::PathChosen {
                    kind: self.kind,
                    path: PathBuf::from(path),
                });
            }
            (KeyCode::Esc, _) => return Some(ComponentEvent::Cancelled),
            (KeyCode::Backspace, _) => {
                self.input.pop();
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.input.clear(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.input.push(c);
                self.error = None;
            }
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = super::centered_rect(60, 20, area);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::styled(format!("{}_", self.input), Style::default().fg(theme.text)),
        ]));
        f.render_widget(input, chunks[0]);

        let footer = self.error.as_ref().map_or_else(
            || {
                Span::styled(
                    "Enter confirm • Esc cancel",
                    Style::default().fg(theme.text_muted),
                )
            },
            |err| Span::styled(err.clone(), Style::default().fg(theme.error)),
        );
        f.render_widget(Paragraph::new(Line::from(footer)), chunks[1]);
    }
}
