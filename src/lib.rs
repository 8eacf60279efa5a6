//! Textbox - embeddable multi-line text editing engine
//!
//! This crate provides the buffer, line index, incremental lexer and caret
//! model behind a code-editing widget, plus a small tab manager and the
//! ambient config/logging plumbing a host application needs.

pub mod clipboard;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod error;
pub mod file_source;
pub mod tabs;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::EditorConfig;
pub use editable::{EditingEngine, GlyphMetrics, MonospaceMetrics, Position, TextEditMsg};
pub use error::EditError;
pub use tabs::TabManager;
