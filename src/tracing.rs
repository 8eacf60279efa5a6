//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging caret
//! movement and line table changes.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=cursor=debug` - caret state changes only
//! - `RUST_LOG=textbox::editable=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/textbox/logs/textbox.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::{EditingEngine, GlyphMetrics};

/// Base name of the rolling log file
pub const LOG_FILE_NAME: &str = "textbox.log";

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/textbox/logs/textbox.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A host may already have installed a subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of caret state for diffing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSnapshot {
    pub caret: usize,
    pub line: usize,
    pub column: usize,
    pub indent_level: usize,
    pub line_count: usize,
}

impl CursorSnapshot {
    pub fn from_engine<M: GlyphMetrics>(engine: &EditingEngine<M>) -> Self {
        Self {
            caret: engine.caret(),
            line: engine.current_line(),
            column: engine.current_column(),
            indent_level: engine.cursor().indent_level,
            line_count: engine.line_count(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &CursorSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.line != other.line || self.column != other.column {
            changes.push(format!(
                "({},{}) → ({},{})",
                self.line, self.column, other.line, other.column
            ));
        }
        if self.line_count != other.line_count {
            changes.push(format!(
                "lines: {} → {}",
                self.line_count, other.line_count
            ));
        }
        if self.indent_level != other.indent_level {
            changes.push(format!(
                "indent: {} → {}",
                self.indent_level, other.indent_level
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
