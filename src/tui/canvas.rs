//! Canvas widget for rendering the active floor's grid, rooms and doors.
//!
//! Each grid cell is `CELL_COLS` x `CELL_ROWS` terminal cells. Grid line `i`
//! sits on canvas column `i * CELL_COLS`, so the canvas is one column and one
//! row larger than the cells it holds.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};
use crate::editor::{Editor, Selection};
use crate::models::{Door, Orientation, Room, RoomCategory};
use crate::services::geometry::{CELL_COLS, CELL_ROWS, GRID_H, GRID_W};

/// Canvas width in terminal columns.
pub const CANVAS_COLS: u16 = GRID_W as u16 * CELL_COLS + 1;

/// Canvas height in terminal rows.
pub const CANVAS_ROWS: u16 = GRID_H as u16 * CELL_ROWS + 1;

/// What a canvas cell depicts, resolved to a color at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Nothing drawn
    Blank,
    /// Grid intersection
    Grid,
    /// Room outline, colored by category
    Room(RoomCategory),
    /// Outline of a room that overlaps another
    Overlap,
    /// Selected room or door
    Selected,
    /// Door stroke
    Door,
    /// Room label text
    Label,
}

/// One terminal cell of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasCell {
    /// Drawn character
    pub symbol: char,
    /// Color role
    pub paint: Paint,
    /// Under the keyboard cursor
    pub cursor: bool,
}

impl Default for CanvasCell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            paint: Paint::Blank,
            cursor: false,
        }
    }
}

/// Character buffer for one floor, independent of any terminal.
#[derive(Debug, Clone)]
pub struct CanvasBuffer {
    width: usize,
    height: usize,
    cells: Vec<CanvasCell>,
}

impl CanvasBuffer {
    /// Draws the editor's active floor with the keyboard cursor on `cursor`.
    #[must_use]
    pub fn draw(editor: &Editor, cursor: (i32, i32)) -> Self {
        let width = usize::from(CANVAS_COLS);
        let height = usize::from(CANVAS_ROWS);
        let mut buffer = Self {
            width,
            height,
            cells: vec![CanvasCell::default(); width * height],
        };

        buffer.draw_grid();

        let overlaps = editor.overlaps();
        for room in editor.rooms() {
            let paint = if matches!(editor.selection(), Some(Selection::Room(id)) if *id == room.id)
            {
                Paint::Selected
            } else if overlaps.contains(&room.id) {
                Paint::Overlap
            } else {
                Paint::Room(room.category)
            };
            buffer.draw_room(room, paint);
        }

        for door in editor.doors() {
            let selected =
                matches!(editor.selection(), Some(Selection::Door(id)) if *id == door.id);
            buffer.draw_door(door, if selected { Paint::Selected } else { Paint::Door });
        }

        buffer.mark_cursor(cursor);
        buffer
    }

    /// The cell at canvas column `x`, row `y`.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&CanvasCell> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    /// The characters of canvas row `y`.
    #[must_use]
    pub fn row_text(&self, y: usize) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.symbol)
            .collect()
    }

    /// Converts the buffer into styled lines, merging runs of equal style.
    #[must_use]
    pub fn to_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        (0..self.height)
            .map(|y| {
                let mut spans: Vec<Span<'static>> = Vec::new();
                let mut run = String::new();
                let mut run_style: Option<Style> = None;
                for x in 0..self.width {
                    let Some(cell) = self.get(x, y) else { continue };
                    let style = cell_style(cell, theme);
                    if run_style != Some(style) {
                        if let Some(prev) = run_style {
                            spans.push(Span::styled(std::mem::take(&mut run), prev));
                        }
                        run_style = Some(style);
                    }
                    run.push(cell.symbol);
                }
                if let Some(style) = run_style {
                    spans.push(Span::styled(run, style));
                }
                Line::from(spans)
            })
            .collect()
    }

    fn put(&mut self, x: i64, y: i64, symbol: char, paint: Paint) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            let cell = &mut self.cells[y * self.width + x];
            cell.symbol = symbol;
            cell.paint = paint;
        }
    }

    fn draw_grid(&mut self) {
        for row in (0..=i64::from(GRID_H)).map(|r| r * i64::from(CELL_ROWS)) {
            for col in (0..=i64::from(GRID_W)).map(|c| c * i64::from(CELL_COLS)) {
                self.put(col, row, '·', Paint::Grid);
            }
        }
    }

    fn draw_room(&mut self, room: &Room, paint: Paint) {
        let cols = i64::from(CELL_COLS);
        let rows = i64::from(CELL_ROWS);
        let left = i64::from(room.x) * cols;
        let top = i64::from(room.y) * rows;
        let right = i64::from(room.x + room.w) * cols;
        let bottom = i64::from(room.y + room.h) * rows;

        for x in left + 1..right {
            self.put(x, top, '─', paint);
            self.put(x, bottom, '─', paint);
        }
        for y in top + 1..bottom {
            self.put(left, y, '│', paint);
            self.put(right, y, '│', paint);
        }
        self.put(left, top, '┌', paint);
        self.put(right, top, '┐', paint);
        self.put(left, bottom, '└', paint);
        self.put(right, bottom, '┘', paint);

        let inner = usize::try_from(right - left - 1).unwrap_or(0);
        self.write_label(left + 1, top + 1, &room.name, inner);
        if room.h >= 2 {
            let size = format!("{}x{}", room.w, room.h);
            self.write_label(left + 1, top + 3, &size, inner);
        }
    }

    fn write_label(&mut self, x: i64, y: i64, text: &str, max_len: usize) {
        for (offset, c) in (0_i64..).zip(text.chars().take(max_len)) {
            self.put(x + offset, y, c, Paint::Label);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_door(&mut self, door: &Door, paint: Paint) {
        // Door anchors and lengths are half-cell multiples, which land on
        // whole canvas cells for even CELL_COLS/CELL_ROWS.
        let start_x = (door.x * f64::from(CELL_COLS)).round() as i64;
        let start_y = (door.y * f64::from(CELL_ROWS)).round() as i64;
        match door.orient {
            Orientation::Horizontal => {
                let end = ((door.x + door.length()) * f64::from(CELL_COLS)).round() as i64;
                for x in start_x..=end {
                    self.put(x, start_y, '━', paint);
                }
            }
            Orientation::Vertical => {
                let end = ((door.y + door.length()) * f64::from(CELL_ROWS)).round() as i64;
                for y in start_y..=end {
                    self.put(start_x, y, '┃', paint);
                }
            }
        }
    }

    fn mark_cursor(&mut self, (cx, cy): (i32, i32)) {
        let cols = i64::from(CELL_COLS);
        let row = i64::from(cy) * i64::from(CELL_ROWS) + 1;
        for x in i64::from(cx) * cols + 1..(i64::from(cx) + 1) * cols {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(row)) else {
                continue;
            };
            if x < self.width && y < self.height {
                self.cells[y * self.width + x].cursor = true;
            }
        }
    }
}

fn cell_style(cell: &CanvasCell, theme: &Theme) -> Style {
    let style = match cell.paint {
        Paint::Blank => Style::default().fg(theme.text),
        Paint::Grid => Style::default().fg(theme.grid),
        Paint::Room(category) => {
            let (r, g, b) = category.rgb();
            Style::default().fg(Color::Rgb(r, g, b))
        }
        Paint::Overlap => Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        Paint::Selected => Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
        Paint::Door => Style::default().fg(theme.door),
        Paint::Label => Style::default().fg(theme.text_secondary),
    };
    if cell.cursor {
        style.bg(theme.highlight_bg)
    } else {
        style
    }
}

/// Canvas widget renders the active floor
pub struct CanvasWidget;

impl CanvasWidget {
    /// Render the canvas into `area`, which should come from [`super::screen_layout`].
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let editor = &state.editor;
        let title = format!(" {} · {} ", editor.floor(), editor.mode().label());

        let buffer = CanvasBuffer::draw(editor, state.cursor);
        let canvas = Paragraph::new(buffer.to_lines(theme)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .style(Style::default().bg(theme.background)),
        );
        f.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditMode;
    use crate::services::geometry::GridPoint;

    fn p(x: f64, y: f64) -> GridPoint {
        GridPoint::new(x, y)
    }

    #[test]
    fn test_empty_grid_marks_intersections() {
        let buffer = CanvasBuffer::draw(&Editor::default(), (-1, -1));
        let top = buffer.row_text(0);
        assert_eq!(top.chars().count(), usize::from(CANVAS_COLS));
        assert_eq!(top.chars().filter(|c| *c == '·').count(), 15);
        assert!(buffer.row_text(1).trim().is_empty());
        assert!(buffer.get(usize::from(CANVAS_COLS), 0).is_none());
    }

    #[test]
    fn test_room_outline_and_label() {
        let mut editor = Editor::default();
        editor.add_room_at(p(1.0, 1.0));
        editor.clear_selection();
        let buffer = CanvasBuffer::draw(&editor, (-1, -1));

        assert_eq!(buffer.get(4, 2).map(|c| c.symbol), Some('┌'));
        assert_eq!(buffer.get(16, 8).map(|c| c.symbol), Some('┘'));
        assert!(buffer.row_text(3).contains("Room 1"));
        assert!(buffer.row_text(5).contains("3x3"));
        assert_eq!(
            buffer.get(4, 2).map(|c| c.paint),
            Some(Paint::Room(RoomCategory::default()))
        );
    }

    #[test]
    fn test_overlap_and_selection_paint() {
        let mut editor = Editor::default();
        editor.add_room_at(p(0.0, 0.0));
        editor.add_room_at(p(2.0, 2.0));
        let buffer = CanvasBuffer::draw(&editor, (-1, -1));

        // First room is flagged, second is selected
        assert_eq!(buffer.get(0, 0).map(|c| c.paint), Some(Paint::Overlap));
        assert_eq!(buffer.get(8, 4).map(|c| c.paint), Some(Paint::Selected));
    }

    #[test]
    fn test_doors_follow_orientation() {
        let mut editor = Editor::default();
        editor.set_mode(EditMode::Doors);
        editor.add_door_at(p(2.5, 3.0));
        editor.clear_selection();
        let buffer = CanvasBuffer::draw(&editor, (-1, -1));

        // Width 2 half cells spans one cell: columns 10..=14 on row 6
        let row = buffer.row_text(6);
        assert_eq!(row.chars().filter(|c| *c == '━').count(), 5);
        assert_eq!(buffer.get(10, 6).map(|c| c.paint), Some(Paint::Door));
    }

    #[test]
    fn test_door_at_grid_edge_is_clipped() {
        let mut editor = Editor::default();
        editor.set_mode(EditMode::Doors);
        editor.add_door_at(p(14.0, 12.0));
        let buffer = CanvasBuffer::draw(&editor, (-1, -1));
        let last = usize::from(CANVAS_COLS) - 1;
        assert_eq!(
            buffer.get(last, usize::from(CANVAS_ROWS) - 1).map(|c| c.paint),
            Some(Paint::Selected)
        );
    }

    #[test]
    fn test_cursor_highlights_cell_interior() {
        let buffer = CanvasBuffer::draw(&Editor::default(), (2, 1));
        let marked: Vec<(usize, usize)> = (0..usize::from(CANVAS_ROWS))
            .flat_map(|y| (0..usize::from(CANVAS_COLS)).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer.get(x, y).is_some_and(|c| c.cursor))
            .collect();
        assert_eq!(marked, vec![(9, 3), (10, 3), (11, 3)]);
    }

    #[test]
    fn test_lines_cover_full_width() {
        let mut editor = Editor::default();
        editor.add_room_at(p(3.0, 3.0));
        let lines = CanvasBuffer::draw(&editor, (0, 0)).to_lines(&Theme::dark());
        assert_eq!(lines.len(), usize::from(CANVAS_ROWS));
        assert!(lines.iter().all(|l| l.width() == usize::from(CANVAS_COLS)));
    }
}
