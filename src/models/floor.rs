//! Floor identifiers and per-floor storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two independent floors of a plan.
///
/// Serialized as the JSON object keys `"1"` and `"2"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Floor {
    /// Ground floor
    #[default]
    #[serde(rename = "1")]
    First,
    /// Upper floor
    #[serde(rename = "2")]
    Second,
}

impl Floor {
    /// Both floors, in display order.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// Returns the user-facing floor number (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }

    /// Looks up a floor by its number.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            _ => None,
        }
    }

    /// Returns the other floor.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Floor {}", self.number())
    }
}

impl FromStr for Floor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| format!("Invalid floor '{s}' (expected 1 or 2)"))
    }
}

/// A value stored once per floor.
///
/// Both floors are always present; deserialization fails if either key is missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerFloor<T> {
    /// Value for floor 1
    #[serde(rename = "1")]
    pub first: T,
    /// Value for floor 2
    #[serde(rename = "2")]
    pub second: T,
}

impl<T> PerFloor<T> {
    /// Creates a per-floor value from both halves.
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    /// Returns the value for a floor.
    pub const fn get(&self, floor: Floor) -> &T {
        match floor {
            Floor::First => &self.first,
            Floor::Second => &self.second,
        }
    }

    /// Returns the value for a floor (mutable).
    pub fn get_mut(&mut self, floor: Floor) -> &mut T {
        match floor {
            Floor::First => &mut self.first,
            Floor::Second => &mut self.second,
        }
    }

    /// Iterates over `(floor, value)` pairs in floor order.
    pub fn iter(&self) -> impl Iterator<Item = (Floor, &T)> {
        [(Floor::First, &self.first), (Floor::Second, &self.second)].into_iter()
    }
}
