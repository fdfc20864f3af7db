//! GridPlan - Terminal-based floor-plan editor
//!
//! Without a subcommand this opens the editor; the subcommands work on plan
//! files and the autosave slot without a terminal UI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use gridplan::cli::{CliContext, ExportArgs, ImportArgs, InspectArgs, ValidateArgs};
use gridplan::config::Config;
use gridplan::constants::APP_BINARY_NAME;
use gridplan::editor::Editor;
use gridplan::logging::{self, LogTarget};
use gridplan::services::AutosaveSlot;
use gridplan::tui;

/// GridPlan - Terminal-based floor-plan editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to run (opens the editor when omitted)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Plan file to open instead of the autosaved plan
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the autosave slot
    #[arg(long, value_name = "DIR", global = true)]
    autosave_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a plan as JSON
    Export(ExportArgs),
    /// Replace the autosaved plan with a file
    Import(ImportArgs),
    /// Show rooms, doors, area and overlaps
    Inspect(InspectArgs),
    /// Check a plan file
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        if let Err(e) = logging::init(cli.verbose, LogTarget::Stderr) {
            eprintln!("Warning: failed to initialize logging: {e:#}");
        }

        let context = CliContext {
            autosave_dir: cli.autosave_dir,
        };
        let result = match command {
            Commands::Export(args) => args.execute(&context),
            Commands::Import(args) => args.execute(&context),
            Commands::Inspect(args) => args.execute(&context),
            Commands::Validate(args) => args.execute(),
        };

        if let Err(err) = result {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code());
        }
        return Ok(());
    }

    run_editor(cli.file.as_deref(), cli.autosave_dir.as_deref(), cli.verbose)
}

/// Opens the TUI, restoring the autosaved plan or importing `file`.
fn run_editor(file: Option<&Path>, autosave_dir: Option<&Path>, verbose: bool) -> Result<()> {
    if let Some(path) = file {
        if !path.exists() {
            eprintln!("Error: Plan file not found: {}", path.display());
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {APP_BINARY_NAME}                 open the autosaved plan");
            eprintln!("  {APP_BINARY_NAME} floorplan.json  open a plan file");
            eprintln!();
            eprintln!("For more options, run:");
            eprintln!("  {APP_BINARY_NAME} --help");
            std::process::exit(2);
        }
    }

    // The terminal belongs to the UI, so logs go to a file
    let log_path = Config::log_file_path()?;
    logging::init(verbose, LogTarget::File(log_path))?;

    let config = match Config::load_or_create() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "using default config");
            Config::default()
        }
    };

    let mut editor = if config.autosave.enabled {
        let dir = config.autosave_dir(autosave_dir)?;
        let slot = AutosaveSlot::in_dir(&dir);
        tracing::info!(path = %slot.path().display(), "autosave enabled");
        Editor::restore(Box::new(slot))
    } else {
        Editor::default()
    };

    if let Some(path) = file {
        editor
            .import_file(path, Instant::now())
            .with_context(|| format!("Failed to open {}", path.display()))?;
    }

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(editor, config);

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    // Check for errors
    result
}
