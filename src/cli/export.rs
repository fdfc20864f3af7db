//! Export command: writes a plan envelope to a file or stdout.

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::parser;
use crate::services::plans::write_atomic;
use clap::Args;
use std::path::PathBuf;

/// Export a plan as a pretty-printed JSON envelope
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Plan file to export (defaults to the autosave slot)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        let plan = context.load_plan(self.input.as_deref())?;
        let json = parser::encode(&plan)
            .map_err(|e| CliError::io(format!("Failed to serialize plan: {e:#}")))?;

        match &self.output {
            Some(path) => {
                write_atomic(path, &json)
                    .map_err(|e| CliError::io(format!("Failed to write output file: {e:#}")))?;
                tracing::info!(path = %path.display(), "plan exported");
                println!("✓ Exported plan to: {}", path.display());
            }
            None => println!("{json}"),
        }

        Ok(())
    }
}
