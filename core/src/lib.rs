//! # EditKit Core
//!
//! Transactional undo/redo engine for editor tools.

pub mod abstract_editor;
pub mod config;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
