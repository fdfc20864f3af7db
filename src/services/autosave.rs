//! Local autosave slot.
//!
//! The slot holds the same envelope as a file export. It is written after
//! every plan change and read once at startup.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::AUTOSAVE_KEY;
use crate::models::Plan;
use crate::parser;
use crate::services::plans::write_atomic;

/// Somewhere a plan can be kept between sessions.
pub trait PlanStore {
    /// Returns the stored plan, or `None` if there is nothing usable.
    ///
    /// Unreadable or invalid data is treated as absent.
    fn load(&self) -> Option<Plan>;

    /// Stores a plan, replacing whatever was there.
    fn save(&self, plan: &Plan) -> Result<()>;
}

/// File-backed autosave slot: `<dir>/gridplan.autosave.v1.json`.
#[derive(Debug, Clone)]
pub struct AutosaveSlot {
    path: PathBuf,
}

impl AutosaveSlot {
    /// Slot inside the given directory.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{AUTOSAVE_KEY}.json")),
        }
    }

    /// Full path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanStore for AutosaveSlot {
    fn load(&self) -> Option<Plan> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no autosave to restore");
            return None;
        }

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "autosave unreadable");
                return None;
            }
        };

        match parser::decode(&text) {
            Ok(plan) => {
                tracing::debug!(path = %self.path.display(), "restored autosave");
                Some(plan)
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring autosave");
                None
            }
        }
    }

    fn save(&self, plan: &Plan) -> Result<()> {
        let text = parser::encode(plan)?;
        write_atomic(&self.path, &text)?;
        tracing::debug!(path = %self.path.display(), revision = plan.revision(), "autosaved");
        Ok(())
    }
}
