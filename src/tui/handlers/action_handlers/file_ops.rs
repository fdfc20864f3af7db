// File operations action handlers (export, import, clipboard)

use crate::services::plans::{default_export_name, write_atomic};
use crate::tui::component::PathPromptKind;
use crate::tui::AppState;
use anyhow::Result;
use std::path::Path;
use std::time::Instant;

/// Handle quit action
pub fn handle_quit(state: &mut AppState) -> Result<bool> {
    state.should_quit = true;
    Ok(true)
}

/// Handle export action: asks for a destination
pub fn handle_export(state: &mut AppState) -> Result<bool> {
    let initial = default_export_name(chrono::Local::now().date_naive());
    state.open_path_prompt(PathPromptKind::Export, initial);
    Ok(false)
}

/// Handle import action: asks for a source
pub fn handle_import(state: &mut AppState) -> Result<bool> {
    state.open_path_prompt(PathPromptKind::Import, String::new());
    Ok(false)
}

/// Handle copy action: puts the exported JSON on the system clipboard
pub fn handle_copy_json(state: &mut AppState) -> Result<bool> {
    let json = state.editor.export_json()?;
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(json)) {
        Ok(()) => state.set_status("Plan JSON copied to clipboard"),
        Err(e) => state.set_error(format!("Failed to copy to clipboard: {e}")),
    }
    Ok(false)
}

/// Write the plan to `path`
pub fn perform_export(state: &mut AppState, path: &Path) {
    let result = state
        .editor
        .export_json()
        .and_then(|json| write_atomic(path, &json));
    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), "plan exported");
            state.set_status(format!("Exported to {}", path.display()));
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "export failed");
            state.set_error(format!("Export failed: {e:#}"));
        }
    }
}

/// Replace the plan with the contents of `path`
///
/// The editor reports the outcome through its notice.
pub fn perform_import(state: &mut AppState, path: &Path) {
    // Failure is already surfaced as a notice and logged
    let _ = state.editor.import_file(path, Instant::now());
}
