//! Help registry for centralized keybinding definitions.
//!
//! This module loads help definitions from an embedded TOML file and provides
//! methods to query bindings by context for the status bar and help overlay.

use serde::Deserialize;
use std::collections::HashMap;

/// Embedded help definitions TOML file
const HELP_TOML: &str = include_str!("../data/help.toml");

/// A single keybinding definition
#[derive(Debug, Clone, Deserialize)]
pub struct Binding {
    /// Shortcut action id, when the binding is dispatched through the registry
    #[serde(default)]
    pub id: Option<String>,
    /// Primary key(s) for this action
    pub keys: Vec<String>,
    /// Alternative keys (optional)
    #[serde(default)]
    pub alt_keys: Vec<String>,
    /// Full description of the action
    pub action: String,
    /// Short hint for status bar (optional)
    pub hint: Option<String>,
    /// Priority for display order (lower = more important, shown first)
    #[serde(default = "default_priority")]
    pub priority: u32,
}

const fn default_priority() -> u32 {
    50
}

/// A context with its bindings
#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    /// Human-readable name
    pub name: String,
    /// Description of when this context is active
    pub description: String,
    /// Keybindings for this context
    pub bindings: Vec<Binding>,
}

/// Metadata about the help file
#[derive(Debug, Clone, Deserialize)]
pub struct HelpMeta {
    /// Version of the help file format
    pub version: String,
    /// Name of the application
    pub app_name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct HelpFile {
    meta: HelpMeta,
    contexts: HashMap<String, Context>,
}

/// Help registry providing access to keybinding definitions
#[derive(Debug, Clone)]
pub struct HelpRegistry {
    meta: HelpMeta,
    contexts: HashMap<String, Context>,
}

impl HelpRegistry {
    /// Load the help registry from the embedded TOML file
    pub fn load() -> Result<Self, toml::de::Error> {
        let help_file: HelpFile = toml::from_str(HELP_TOML)?;
        Ok(Self {
            meta: help_file.meta,
            contexts: help_file.contexts,
        })
    }

    fn empty() -> Self {
        Self {
            meta: HelpMeta {
                version: String::new(),
                app_name: crate::constants::APP_NAME.to_string(),
            },
            contexts: HashMap::new(),
        }
    }

    /// Get the app name from metadata
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.meta.app_name
    }

    /// Get a context by name
    #[must_use]
    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// Get all bindings for a context, sorted by priority
    #[must_use]
    pub fn get_bindings(&self, context_name: &str) -> Vec<&Binding> {
        self.contexts
            .get(context_name)
            .map(|context| {
                let mut bindings: Vec<&Binding> = context.bindings.iter().collect();
                bindings.sort_by_key(|b| b.priority);
                bindings
            })
            .unwrap_or_default()
    }

    /// Get the bindings with a status bar hint, sorted by priority
    #[must_use]
    pub fn get_status_bar_hints(&self, context_name: &str) -> Vec<&Binding> {
        self.get_bindings(context_name)
            .into_iter()
            .filter(|b| b.hint.is_some())
            .collect()
    }

    /// Format a binding for display in help overlay
    /// Returns (`keys_string`, `action_string`)
    #[must_use]
    pub fn format_binding_for_help(binding: &Binding) -> (String, String) {
        let keys = if binding.alt_keys.is_empty() {
            binding.keys.join("/")
        } else {
            format!(
                "{} ({})",
                binding.keys.join("/"),
                binding.alt_keys.join("/")
            )
        };
        (keys, binding.action.clone())
    }

    /// Format bindings for status bar display as (key, hint) pairs
    #[must_use]
    pub fn format_status_bar_hints(
        &self,
        context_name: &str,
        max_hints: usize,
    ) -> Vec<(String, String)> {
        self.get_status_bar_hints(context_name)
            .into_iter()
            .take(max_hints)
            .map(|b| {
                let key = b.keys.first().map_or("", String::as_str);
                let hint = b.hint.as_deref().unwrap_or(&b.action);
                (key.to_string(), hint.to_string())
            })
            .collect()
    }
}

impl Default for HelpRegistry {
    fn default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::error!(error = %err, "embedded help.toml is invalid");
            Self::empty()
        })
    }
}

/// Known context names
pub mod contexts {
    /// Canvas editing
    pub const MAIN: &str = "main";
    /// Pointer actions (informational)
    pub const MOUSE: &str = "mouse";
    /// Room/door properties form
    pub const ENTITY_FORM: &str = "entity_form";
    /// Export/import path prompt
    pub const PATH_PROMPT: &str = "path_prompt";
    /// Help overlay
    pub const HELP: &str = "help";

    /// Display order in the help overlay.
    pub const ALL: [&str; 5] = [MAIN, MOUSE, ENTITY_FORM, PATH_PROMPT, HELP];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::{Action, ShortcutRegistry};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_load_help_registry() {
        let registry = HelpRegistry::load().expect("Failed to load help registry");
        assert_eq!(registry.app_name(), "GridPlan");
        assert_eq!(registry.meta.version, "1.0");
    }

    #[test]
    fn test_every_context_is_defined() {
        let registry = HelpRegistry::load().unwrap();
        for name in contexts::ALL {
            assert!(registry.get_context(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_get_bindings_sorted_by_priority() {
        let registry = HelpRegistry::load().unwrap();
        let bindings = registry.get_bindings(contexts::MAIN);
        assert!(!bindings.is_empty());
        for window in bindings.windows(2) {
            assert!(window[0].priority <= window[1].priority);
        }
    }

    #[test]
    fn test_format_status_bar_hints() {
        let registry = HelpRegistry::load().unwrap();
        let hints = registry.format_status_bar_hints(contexts::MAIN, 5);
        assert_eq!(hints.len(), 5);
        assert_eq!(hints[0], ("m".to_string(), "Mode".to_string()));
    }

    #[test]
    fn test_unknown_context_is_empty() {
        let registry = HelpRegistry::load().unwrap();
        assert!(registry.get_bindings("nope").is_empty());
    }

    #[test]
    fn test_main_ids_match_shortcut_actions() {
        let registry = HelpRegistry::load().unwrap();
        let shortcuts = ShortcutRegistry::new();
        let ids: Vec<&str> = registry
            .get_bindings(contexts::MAIN)
            .iter()
            .filter_map(|b| b.id.as_deref())
            .collect();

        // Each documented primary key must dispatch to the documented action
        let samples = [
            (KeyCode::Char('a'), KeyModifiers::NONE, Action::AddAtCursor),
            (KeyCode::Char('r'), KeyModifiers::NONE, Action::Rotate),
            (KeyCode::Tab, KeyModifiers::NONE, Action::SwitchFloor),
            (KeyCode::Char('m'), KeyModifiers::NONE, Action::ToggleMode),
            (KeyCode::Char('e'), KeyModifiers::NONE, Action::Export),
            (KeyCode::Char('?'), KeyModifiers::NONE, Action::ToggleHelp),
        ];
        for (code, modifiers, action) in samples {
            assert_eq!(
                shortcuts.lookup("main", KeyEvent::new(code, modifiers)),
                Some(action)
            );
            assert!(ids.contains(&action.id()), "{} undocumented", action.id());
        }
    }
}
