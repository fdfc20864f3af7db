//! GridPlan Library
//!
//! This library provides the core of the GridPlan floor-plan editor: the
//! two-floor grid model, the editing session, plan file persistence, the
//! terminal UI and the headless CLI commands.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod logging;
pub mod models;
pub mod parser;
pub mod services;
pub mod shortcuts;
pub mod tui;
