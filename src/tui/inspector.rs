//! Inspector panel: floor totals, overlaps and the selection's properties.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{AppState, Theme};
use crate::editor::Editor;

/// Inspector widget
pub struct Inspector;

impl Inspector {
    /// Render the inspector panel
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let lines = Self::lines(&state.editor, state.cursor, theme);
        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Inspector ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.background)),
            );
        f.render_widget(panel, area);
    }

    fn lines(editor: &Editor, cursor: (i32, i32), theme: &Theme) -> Vec<Line<'static>> {
        let heading = |text: &str| {
            Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ))
        };
        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{label:<9}"), Style::default().fg(theme.text_muted)),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
        };

        let mut lines = vec![
            heading(&editor.floor().to_string()),
            field("Mode", editor.mode().label().to_string()),
            field("Rooms", editor.rooms().len().to_string()),
            field("Doors", editor.doors().len().to_string()),
            field("Area", format!("{:.1}", editor.area())),
            field("Cursor", format!("{}, {}", cursor.0, cursor.1)),
            Line::from(""),
        ];

        let overlaps = editor.overlaps();
        if overlaps.is_empty() {
            lines.push(Line::from(Span::styled(
                "No overlaps",
                Style::default().fg(theme.success),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("{} rooms overlap", overlaps.len()),
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )));
            for room in editor.rooms().iter().filter(|r| overlaps.contains(&r.id)) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", room.name),
                    Style::default().fg(theme.error),
                )));
            }
        }
        lines.push(Line::from(""));

        if let Some(room) = editor.selected_room() {
            lines.push(heading("Selected room"));
            lines.push(field("Name", room.name.clone()));
            lines.push(field("Category", room.category.label().to_string()));
            lines.push(field("Position", format!("{}, {}", room.x, room.y)));
            lines.push(field("Size", format!("{} x {}", room.w, room.h)));
            lines.push(field("Area", format!("{:.1}", room.area())));
        } else if let Some(door) = editor.selected_door() {
            lines.push(heading("Selected door"));
            lines.push(field("Position", format!("{}, {}", door.x, door.y)));
            lines.push(field("Orient", door.orient.label().to_string()));
            lines.push(field("Style", door.style.label().to_string()));
            lines.push(field("Width", door.width.to_string()));
        } else {
            lines.push(Line::from(Span::styled(
                "Nothing selected",
                Style::default().fg(theme.text_muted),
            )));
        }

        lines
    }
}
