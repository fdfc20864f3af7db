//! Action handlers organized by category

/// Room and door editing handlers
pub mod entities;

/// File operations handlers (export, import, clipboard)
pub mod file_ops;

/// Cursor, floor and mode handlers
pub mod navigation;

/// Popup and overlay management handlers
pub mod popups;
