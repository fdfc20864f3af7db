//! Door definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::geometry::{is_half_step, GRID_H, GRID_W};

/// Smallest door width, in half-cell units.
pub const MIN_DOOR_WIDTH: u8 = 1;

/// Largest door width, in half-cell units.
pub const MAX_DOOR_WIDTH: u8 = 4;

/// Axis a door extends along from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Extends to the right (+x)
    #[default]
    #[serde(rename = "h")]
    Horizontal,
    /// Extends downwards (+y)
    #[serde(rename = "v")]
    Vertical,
}

impl Orientation {
    /// Returns the other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
        }
    }
}

/// Door swing/style. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorStyle {
    /// Single hinged leaf
    #[default]
    Single,
    /// Double hinged leaves
    Double,
    /// Sliding panel
    Sliding,
    /// Pocket door
    Pocket,
    /// Open passage without a leaf
    Opening,
}

impl DoorStyle {
    /// All styles in display order.
    pub const ALL: [Self; 5] = [
        Self::Single,
        Self::Double,
        Self::Sliding,
        Self::Pocket,
        Self::Opening,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Sliding => "Sliding",
            Self::Pocket => "Pocket",
            Self::Opening => "Opening",
        }
    }

    /// Next style, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous style, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A door: a line segment anchored at a half-cell grid point.
///
/// The segment is `width / 2` cells long and extends from `(x, y)` along
/// its orientation axis. Doors are never checked against walls or each other.
///
/// # Validation
///
/// - `0 <= x <= GRID_W`, `0 <= y <= GRID_H`
/// - `x` and `y` are multiples of 0.5
/// - `1 <= width <= 4`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// Opaque unique identifier
    pub id: String,
    /// Anchor column (half-cell granularity)
    pub x: f64,
    /// Anchor row (half-cell granularity)
    pub y: f64,
    /// Axis the door extends along
    pub orient: Orientation,
    /// Display style
    #[serde(rename = "type")]
    pub style: DoorStyle,
    /// Length in half-cell units (1-4)
    pub width: u8,
}

impl Door {
    /// Default width of a newly placed door.
    pub const DEFAULT_WIDTH: u8 = 2;

    /// Creates a door with a fresh id and default orientation, style and width.
    ///
    /// The anchor is taken as given; callers snap and clamp it first.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            x,
            y,
            orient: Orientation::default(),
            style: DoorStyle::default(),
            width: Self::DEFAULT_WIDTH,
        }
    }

    /// Returns a copy placed at a new anchor.
    #[must_use]
    pub fn with_position(&self, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..self.clone()
        }
    }

    /// Segment length in grid cells.
    #[must_use]
    pub fn length(&self) -> f64 {
        f64::from(self.width) / 2.0
    }

    /// Far end of the segment in grid coordinates.
    #[must_use]
    pub fn end_point(&self) -> (f64, f64) {
        match self.orient {
            Orientation::Horizontal => (self.x + self.length(), self.y),
            Orientation::Vertical => (self.x, self.y + self.length()),
        }
    }

    /// Distance from a grid point to the segment.
    #[must_use]
    pub fn distance_to(&self, px: f64, py: f64) -> f64 {
        let (ex, ey) = self.end_point();
        let cx = px.clamp(self.x.min(ex), self.x.max(ex));
        let cy = py.clamp(self.y.min(ey), self.y.max(ey));
        (px - cx).hypot(py - cy)
    }

    /// Checks the data-model invariants, describing the first violation.
    pub fn check(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("door id cannot be empty".to_string());
        }
        if !(MIN_DOOR_WIDTH..=MAX_DOOR_WIDTH).contains(&self.width) {
            return Err(format!(
                "width {} outside {MIN_DOOR_WIDTH}-{MAX_DOOR_WIDTH}",
                self.width
            ));
        }
        if !(0.0..=f64::from(GRID_W)).contains(&self.x)
            || !(0.0..=f64::from(GRID_H)).contains(&self.y)
        {
            return Err(format!(
                "anchor ({}, {}) outside the {}x{} grid",
                self.x, self.y, GRID_W, GRID_H
            ));
        }
        if !is_half_step(self.x) || !is_half_step(self.y) {
            return Err(format!(
                "anchor ({}, {}) is not on the half-cell grid",
                self.x, self.y
            ));
        }
        Ok(())
    }
}
