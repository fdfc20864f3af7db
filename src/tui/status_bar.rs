//! Status bar widget for displaying notices and contextual help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

use super::help_registry::{contexts, HelpRegistry};
use super::{AppState, PopupType, Theme};
use crate::editor::NoticeKind;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: the active notice (or drag state) above a hints line.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let first_line = if let Some(notice) = state.editor.active_notice(Instant::now()) {
            let (label, color) = match notice.kind {
                NoticeKind::Info => ("", theme.success),
                NoticeKind::Error => ("ERROR: ", theme.error),
            };
            Line::from(vec![
                Span::styled(label, Style::default().fg(theme.error)),
                Span::styled(notice.text.clone(), Style::default().fg(color)),
            ])
        } else if let Some(drag) = state.editor.drag() {
            Line::from(Span::styled(
                format!("Dragging {:?}, release to drop", drag.kind),
                Style::default().fg(theme.text_secondary),
            ))
        } else {
            Line::from("")
        };

        let status = Paragraph::new(vec![first_line, Self::hints_line(state, theme)])
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Get a line of contextual hints from the help registry
    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let context_name = Self::current_context(state);
        let registry = HelpRegistry::default();
        let hints = registry.format_status_bar_hints(context_name, 8);

        if hints.is_empty() {
            return Line::from("Press ? for help");
        }

        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(action, Style::default().fg(theme.text_muted)));
        }

        Line::from(spans)
    }

    /// Get the current help context based on application state
    const fn current_context(state: &AppState) -> &'static str {
        match &state.active_popup {
            Some(PopupType::EntityForm) => contexts::ENTITY_FORM,
            Some(PopupType::PathPrompt) => contexts::PATH_PROMPT,
            Some(PopupType::HelpOverlay) => contexts::HELP,
            None => contexts::MAIN,
        }
    }
}
