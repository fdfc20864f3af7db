//! Versioned JSON envelope for exported and autosaved plans.
//!
//! ```json
//! {
//!   "version": 1,
//!   "rooms": { "1": [ ... ], "2": [ ... ] },
//!   "doors": { "1": [ ... ], "2": [ ... ] }
//! }
//! ```
//!
//! Decoding is all-or-nothing: the text is checked for a supported version,
//! decoded into typed entities, and every entity is checked against the
//! model invariants before a [`Plan`] is produced.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Door, Floor, PerFloor, Plan, Room};

/// Envelope version written by this build and the only one accepted on import.
pub const PLAN_VERSION: u64 = 1;

/// Reasons an envelope is rejected.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Text is not JSON at all
    #[error("not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Top level has no `version` field
    #[error("missing version field")]
    MissingVersion,

    /// `version` is present but not one this build reads
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),

    /// Required fields are absent or have the wrong shape
    #[error("invalid plan structure: {0}")]
    Schema(#[source] serde_json::Error),

    /// An entity breaks the model invariants
    #[error("{floor}: {id}: {reason}")]
    InvalidEntity {
        /// Floor holding the entity
        floor: Floor,
        /// Entity id
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialized form of a [`Plan`].
#[derive(Debug, Serialize, Deserialize)]
struct PlanEnvelope {
    version: u64,
    rooms: PerFloor<Vec<Room>>,
    doors: PerFloor<Vec<Door>>,
}

/// Serializes a plan as a pretty-printed envelope.
pub fn encode(plan: &Plan) -> Result<String> {
    let envelope = PlanEnvelope {
        version: PLAN_VERSION,
        rooms: plan.all_rooms().clone(),
        doors: plan.all_doors().clone(),
    };
    serde_json::to_string_pretty(&envelope).context("Failed to serialize plan")
}

/// Parses an envelope into a plan.
///
/// The returned plan owns all of its data and starts at revision 0.
pub fn decode(text: &str) -> Result<Plan, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    check_version(&value)?;

    let envelope: PlanEnvelope = serde_json::from_value(value).map_err(ImportError::Schema)?;
    check_entities(&envelope)?;

    Ok(Plan::from_parts(envelope.rooms, envelope.doors))
}

fn check_version(value: &Value) -> Result<(), ImportError> {
    let version = value.get("version").ok_or(ImportError::MissingVersion)?;
    let supported = version
        .as_f64()
        .is_some_and(|v| (v - 1.0).abs() < f64::EPSILON);
    if supported {
        Ok(())
    } else {
        Err(ImportError::UnsupportedVersion(version.to_string()))
    }
}

fn check_entities(envelope: &PlanEnvelope) -> Result<(), ImportError> {
    for (floor, rooms) in envelope.rooms.iter() {
        let mut seen = HashSet::new();
        for room in rooms {
            room.check().map_err(|reason| invalid(floor, &room.id, reason))?;
            if !seen.insert(room.id.as_str()) {
                return Err(invalid(floor, &room.id, "duplicate room id".to_string()));
            }
        }
    }

    for (floor, doors) in envelope.doors.iter() {
        let mut seen = HashSet::new();
        for door in doors {
            door.check().map_err(|reason| invalid(floor, &door.id, reason))?;
            if !seen.insert(door.id.as_str()) {
                return Err(invalid(floor, &door.id, "duplicate door id".to_string()));
            }
        }
    }

    Ok(())
}

fn invalid(floor: Floor, id: &str, reason: String) -> ImportError {
    ImportError::InvalidEntity {
        floor,
        id: id.to_string(),
        reason,
    }
}
