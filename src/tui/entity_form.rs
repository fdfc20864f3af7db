//! Property forms for the selected room or door.
//!
//! Numeric fields are edited as text and parsed on submit. Values are
//! requests: the plan clamps and snaps them into the grid when applied.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::component::{Component, ComponentEvent};
use super::Theme;
use crate::models::door::{MAX_DOOR_WIDTH, MIN_DOOR_WIDTH};
use crate::models::{Door, DoorPatch, DoorStyle, Orientation, Room, RoomCategory, RoomPatch};

/// Field in the room form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomField {
    /// Display name
    Name,
    /// Category (cycled)
    Category,
    /// Left column
    X,
    /// Top row
    Y,
    /// Width in cells
    Width,
    /// Height in cells
    Height,
}

impl RoomField {
    const ALL: [Self; 6] = [
        Self::Name,
        Self::Category,
        Self::X,
        Self::Y,
        Self::Width,
        Self::Height,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category  ◀ ▶",
            Self::X => "X (column)",
            Self::Y => "Y (row)",
            Self::Width => "Width",
            Self::Height => "Height",
        }
    }
}

/// Field in the door form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorField {
    /// Anchor column
    X,
    /// Anchor row
    Y,
    /// Orientation (cycled)
    Orientation,
    /// Style (cycled)
    Style,
    /// Width in half cells
    Width,
}

impl DoorField {
    const ALL: [Self; 5] = [
        Self::X,
        Self::Y,
        Self::Orientation,
        Self::Style,
        Self::Width,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::X => "X (half cells allowed)",
            Self::Y => "Y (half cells allowed)",
            Self::Orientation => "Orientation  ◀ ▶",
            Self::Style => "Style  ◀ ▶",
            Self::Width => "Width (1-4 half cells)",
        }
    }
}

fn step<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let index = all.iter().position(|f| *f == current).unwrap_or(0);
    let len = all.len();
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    all[next]
}

fn parse_field<T: std::str::FromStr>(label: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{label}: '{}' is not a number", value.trim()))
}

/// State for the room properties form.
#[derive(Debug, Clone)]
pub struct RoomFormState {
    /// Currently active field
    pub active_field: RoomField,
    /// Name field value
    pub name: String,
    /// Selected category
    pub category: RoomCategory,
    /// X field value
    pub x: String,
    /// Y field value
    pub y: String,
    /// Width field value
    pub w: String,
    /// Height field value
    pub h: String,
    /// Last validation error
    pub error: Option<String>,
}

impl RoomFormState {
    /// Creates a form prefilled from `room`.
    #[must_use]
    pub fn new(room: &Room) -> Self {
        Self {
            active_field: RoomField::Name,
            name: room.name.clone(),
            category: room.category,
            x: room.x.to_string(),
            y: room.y.to_string(),
            w: room.w.to_string(),
            h: room.h.to_string(),
            error: None,
        }
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.active_field {
            RoomField::Name => Some(&mut self.name),
            RoomField::Category => None,
            RoomField::X => Some(&mut self.x),
            RoomField::Y => Some(&mut self.y),
            RoomField::Width => Some(&mut self.w),
            RoomField::Height => Some(&mut self.h),
        }
    }

    /// Validates the fields and builds the patch.
    pub fn to_patch(&self) -> Result<RoomPatch, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        Ok(RoomPatch {
            name: name.to_string(),
            category: self.category,
            x: parse_field("X", &self.x)?,
            y: parse_field("Y", &self.y)?,
            w: parse_field("Width", &self.w)?,
            h: parse_field("Height", &self.h)?,
        })
    }

    fn value(&self, field: RoomField) -> String {
        match field {
            RoomField::Name => self.name.clone(),
            RoomField::Category => self.category.label().to_string(),
            RoomField::X => self.x.clone(),
            RoomField::Y => self.y.clone(),
            RoomField::Width => self.w.clone(),
            RoomField::Height => self.h.clone(),
        }
    }
}

impl Component for RoomFormState {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => match self.to_patch() {
                Ok(patch) => return Some(ComponentEvent::RoomEdited(patch)),
                Err(err) => self.error = Some(err),
            },
            (KeyCode::Esc, _) => return Some(ComponentEvent::Cancelled),
            (KeyCode::Tab | KeyCode::Down, _) => {
                self.active_field = step(&RoomField::ALL, self.active_field, true);
            }
            (KeyCode::BackTab | KeyCode::Up, _) => {
                self.active_field = step(&RoomField::ALL, self.active_field, false);
            }
            (KeyCode::Right, _) if self.active_field == RoomField::Category => {
                self.category = self.category.next();
            }
            (KeyCode::Left, _) if self.active_field == RoomField::Category => {
                self.category = self.category.previous();
            }
            (KeyCode::Backspace, _) => {
                if let Some(field) = self.text_field_mut() {
                    field.pop();
                }
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let numeric = self.active_field != RoomField::Name;
                if let Some(field) = self.text_field_mut() {
                    if !numeric || c.is_ascii_digit() || c == '-' {
                        field.push(c);
                    }
                }
            }
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let fields: Vec<(&str, String, bool)> = RoomField::ALL
            .iter()
            .map(|&field| (field.label(), self.value(field), field == self.active_field))
            .collect();
        render_form(f, area, " Room Properties ", &fields, self.error.as_deref(), theme);
    }
}

/// State for the door properties form.
#[derive(Debug, Clone)]
pub struct DoorFormState {
    /// Currently active field
    pub active_field: DoorField,
    /// X field value
    pub x: String,
    /// Y field value
    pub y: String,
    /// Selected orientation
    pub orient: Orientation,
    /// Selected style
    pub style: DoorStyle,
    /// Width field value
    pub width: String,
    /// Last validation error
    pub error: Option<String>,
}

impl DoorFormState {
    /// Creates a form prefilled from `door`.
    #[must_use]
    pub fn new(door: &Door) -> Self {
        Self {
            active_field: DoorField::X,
            x: door.x.to_string(),
            y: door.y.to_string(),
            orient: door.orient,
            style: door.style,
            width: door.width.to_string(),
            error: None,
        }
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.active_field {
            DoorField::X => Some(&mut self.x),
            DoorField::Y => Some(&mut self.y),
            DoorField::Width => Some(&mut self.width),
            DoorField::Orientation | DoorField::Style => None,
        }
    }

    /// Validates the fields and builds the patch.
    pub fn to_patch(&self) -> Result<DoorPatch, String> {
        let x: f64 = parse_field("X", &self.x)?;
        let y: f64 = parse_field("Y", &self.y)?;
        if !x.is_finite() || !y.is_finite() {
            return Err("Position must be a finite number".to_string());
        }
        let width: u8 = parse_field("Width", &self.width)?;
        if !(MIN_DOOR_WIDTH..=MAX_DOOR_WIDTH).contains(&width) {
            return Err(format!(
                "Width must be between {MIN_DOOR_WIDTH} and {MAX_DOOR_WIDTH}"
            ));
        }
        Ok(DoorPatch {
            x,
            y,
            orient: self.orient,
            style: self.style,
            width,
        })
    }

    fn value(&self, field: DoorField) -> String {
        match field {
            DoorField::X => self.x.clone(),
            DoorField::Y => self.y.clone(),
            DoorField::Orientation => self.orient.label().to_string(),
            DoorField::Style => self.style.label().to_string(),
            DoorField::Width => self.width.clone(),
        }
    }
}

impl Component for DoorFormState {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => match self.to_patch() {
                Ok(patch) => return Some(ComponentEvent::DoorEdited(patch)),
                Err(err) => self.error = Some(err),
            },
            (KeyCode::Esc, _) => return Some(ComponentEvent::Cancelled),
            (KeyCode::Tab | KeyCode::Down, _) => {
                self.active_field = step(&DoorField::ALL, self.active_field, true);
            }
            (KeyCode::BackTab | KeyCode::Up, _) => {
                self.active_field = step(&DoorField::ALL, self.active_field, false);
            }
            (KeyCode::Left | KeyCode::Right, _) if self.active_field == DoorField::Orientation => {
                self.orient = self.orient.toggled();
            }
            (KeyCode::Right, _) if self.active_field == DoorField::Style => {
                self.style = self.style.next();
            }
            (KeyCode::Left, _) if self.active_field == DoorField::Style => {
                self.style = self.style.previous();
            }
            (KeyCode::Backspace, _) => {
                if let Some(field) = self.text_field_mut() {
                    field.pop();
                }
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT)
                if c.is_ascii_digit() || c == '.' || c == '-' =>
            {
                if let Some(field) = self.text_field_mut() {
                    field.push(c);
                }
            }
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let fields: Vec<(&str, String, bool)> = DoorField::ALL
            .iter()
            .map(|&field| (field.label(), self.value(field), field == self.active_field))
            .collect();
        render_form(f, area, " Door Properties ", &fields, self.error.as_deref(), theme);
    }
}

fn render_form(
    f: &mut Frame,
    area: Rect,
    title: &str,
    fields: &[(&str, String, bool)],
    error: Option<&str>,
    theme: &Theme,
) {
    let area = super::centered_rect(50, 80, area);
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.surface));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(1)); // Error
    constraints.push(Constraint::Length(1)); // Controls

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner_area);

    for (chunk, (label, value, is_active)) in chunks.iter().zip(fields) {
        render_field(f, *chunk, label, value, *is_active, theme);
    }

    if let Some(error) = error {
        let error_paragraph =
            Paragraph::new(error.to_string()).style(Style::default().fg(theme.error));
        f.render_widget(error_paragraph, chunks[fields.len()]);
    }

    let controls = Paragraph::new(Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" apply  "),
        Span::styled(
            "Esc",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" cancel  "),
        Span::styled(
            "Tab",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" next field"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(controls, chunks[fields.len() + 1]);
}

fn render_field(f: &mut Frame, area: Rect, label: &str, value: &str, is_active: bool, theme: &Theme) {
    let (style, border_style) = if is_active {
        (
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(theme.accent),
        )
    } else {
        (
            Style::default().fg(theme.text),
            Style::default().fg(theme.text_muted),
        )
    };

    let display_value = if is_active {
        format!("{value}_")
    } else {
        value.to_string()
    };

    let block = Block::default()
        .title(label.to_string())
        .borders(Borders::ALL)
        .border_style(border_style);

    f.render_widget(Paragraph::new(display_value).style(style).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut impl Component<Event = ComponentEvent>, text: &str) {
        for c in text.chars() {
            form.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_room_form_round_trips_values() {
        let room = Room::new("Den", RoomCategory::Bedroom, 2, 3, 4, 5);
        let mut form = RoomFormState::new(&room);
        assert_eq!(
            form.handle_input(key(KeyCode::Enter)),
            Some(ComponentEvent::RoomEdited(RoomPatch::from(&room)))
        );
    }

    #[test]
    fn test_room_form_edits_name_and_category() {
        let room = Room::new("Den", RoomCategory::Living, 0, 0, 3, 3);
        let mut form = RoomFormState::new(&room);
        type_text(&mut form, "s");
        form.handle_input(key(KeyCode::Tab));
        form.handle_input(key(KeyCode::Right));

        let Some(ComponentEvent::RoomEdited(patch)) = form.handle_input(key(KeyCode::Enter)) else {
            panic!("expected a patch");
        };
        assert_eq!(patch.name, "Dens");
        assert_eq!(patch.category, RoomCategory::Living.next());
    }

    #[test]
    fn test_room_form_numeric_fields_reject_letters() {
        let room = Room::new("Den", RoomCategory::Living, 0, 0, 3, 3);
        let mut form = RoomFormState::new(&room);
        form.active_field = RoomField::Width;
        form.handle_input(key(KeyCode::Backspace));
        type_text(&mut form, "x7");
        assert_eq!(form.w, "7");
    }

    #[test]
    fn test_room_form_reports_errors_and_stays_open() {
        let room = Room::new("Den", RoomCategory::Living, 0, 0, 3, 3);
        let mut form = RoomFormState::new(&room);
        form.name.clear();
        assert_eq!(form.handle_input(key(KeyCode::Enter)), None);
        assert_eq!(form.error.as_deref(), Some("Name cannot be empty"));

        form.name = "Den".to_string();
        form.x.clear();
        assert_eq!(form.handle_input(key(KeyCode::Enter)), None);
        assert!(form.error.as_deref().unwrap_or_default().starts_with("X:"));
    }

    #[test]
    fn test_door_form_cycles_choices() {
        let door = Door::new(1.0, 1.0);
        let mut form = DoorFormState::new(&door);
        form.handle_input(key(KeyCode::Tab));
        form.handle_input(key(KeyCode::Tab));
        assert_eq!(form.active_field, DoorField::Orientation);
        form.handle_input(key(KeyCode::Right));
        form.handle_input(key(KeyCode::Tab));
        form.handle_input(key(KeyCode::Left));

        let Some(ComponentEvent::DoorEdited(patch)) = form.handle_input(key(KeyCode::Enter)) else {
            panic!("expected a patch");
        };
        assert_eq!(patch.orient, Orientation::Vertical);
        assert_eq!(patch.style, DoorStyle::Single.previous());
    }

    #[test]
    fn test_door_form_accepts_half_steps_and_bounds_width() {
        let door = Door::new(0.0, 0.0);
        let mut form = DoorFormState::new(&door);
        form.x = String::new();
        type_text(&mut form, "3.5");
        assert_eq!(form.to_patch().unwrap().x, 3.5);

        form.width = "9".to_string();
        assert!(form.to_patch().is_err());
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = DoorFormState::new(&Door::new(0.0, 0.0));
        assert_eq!(
            form.handle_input(key(KeyCode::Esc)),
            Some(ComponentEvent::Cancelled)
        );
    }
}
