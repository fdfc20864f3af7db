//! Import command: validates a plan file and stores it in the autosave slot.

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::models::Floor;
use crate::services::{PlanService, PlanStore};
use clap::Args;
use std::path::PathBuf;

/// Replace the autosaved plan with the contents of a file
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// Plan file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl ImportArgs {
    /// Execute the import command
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        // Nothing touches the slot until the whole file has been accepted
        let plan =
            PlanService::read(&self.file).map_err(|e| CliError::from_import(&self.file, &e))?;

        let slot = context.autosave_slot()?;
        slot.save(&plan)
            .map_err(|e| CliError::io(format!("Failed to write autosave slot: {e:#}")))?;
        tracing::info!(
            source = %self.file.display(),
            slot = %slot.path().display(),
            "plan imported"
        );

        println!("✓ Imported {} into {}", self.file.display(), slot.path().display());
        for floor in Floor::ALL {
            println!(
                "  {floor}: {} rooms, {} doors",
                plan.rooms(floor).len(),
                plan.doors(floor).len()
            );
        }

        Ok(())
    }
}
