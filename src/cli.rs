//! Command-line argument parsing for the headless textbox tool
//!
//! Supports:
//! - Opening one or more files as tabs
//! - Jump to line/column in the active tab
//! - Typing text at the caret and writing the result back
//! - Dumping lines and tokens as text or JSON

use clap::Parser;
use std::path::PathBuf;

use textbox::Position;

/// Load documents into the editing engine and inspect the result
#[derive(Parser, Debug)]
#[command(
    name = "textbox",
    version,
    about = "Load documents into the editing engine and inspect lines and tokens"
)]
pub struct CliArgs {
    /// Files to open, one tab each; the last one is active
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Go to line N in the active tab
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,

    /// Go to column N (used with --line)
    #[arg(long, value_name = "N")]
    pub column: Option<usize>,

    /// Type TEXT at the caret (\n splits lines, \t indents)
    #[arg(long = "type", value_name = "TEXT")]
    pub typed: Option<String>,

    /// Write the active tab back to its file after typing
    #[arg(short = 'w', long)]
    pub write: bool,

    /// Dump lines and tokens as JSON
    #[arg(long)]
    pub json: bool,

    /// Measure glyphs with this TTF/OTF font instead of fixed-width cells
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,
}

/// How the final document state is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub files: Vec<PathBuf>,
    /// Initial caret position - 1-indexed from user, converted to 0-indexed
    pub initial_position: Option<Position>,
    pub typed: Option<String>,
    pub write: bool,
    pub output: OutputFormat,
    pub font: Option<PathBuf>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if let Some(dir) = self.paths.iter().find(|p| p.is_dir()) {
            return Err(format!("Cannot open directory: {}", dir.display()));
        }
        if self.write && self.paths.is_empty() {
            return Err("--write needs a file to write to".to_string());
        }

        // Convert from 1-indexed (user input) to 0-indexed (internal)
        let initial_position = self.line.map(|line| {
            let line_0 = line.saturating_sub(1);
            let col_0 = self.column.unwrap_or(1).saturating_sub(1);
            Position::new(line_0, col_0)
        });

        Ok(StartupConfig {
            files: self.paths,
            initial_position,
            typed: self.typed,
            write: self.write,
            output: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            font: self.font,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(paths: &[&str]) -> CliArgs {
        CliArgs {
            paths: paths.iter().map(PathBuf::from).collect(),
            line: None,
            column: None,
            typed: None,
            write: false,
            json: false,
            font: None,
        }
    }

    #[test]
    fn test_empty_args() {
        let config = args(&[]).into_config().unwrap();
        assert!(config.files.is_empty());
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_line_column_conversion() {
        let config = CliArgs {
            line: Some(42),
            column: Some(10),
            ..args(&["file.go"])
        }
        .into_config()
        .unwrap();
        // 1-indexed to 0-indexed: line 42 → 41, column 10 → 9
        assert_eq!(config.initial_position, Some(Position::new(41, 9)));
    }

    #[test]
    fn test_line_without_column() {
        let config = CliArgs {
            line: Some(10),
            ..args(&["file.go"])
        }
        .into_config()
        .unwrap();
        assert_eq!(config.initial_position, Some(Position::new(9, 0)));
    }

    #[test]
    fn test_write_requires_file() {
        let result = CliArgs {
            write: true,
            ..args(&[])
        }
        .into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_json_flag() {
        let config = CliArgs {
            json: true,
            ..args(&[])
        }
        .into_config()
        .unwrap();
        assert_eq!(config.output, OutputFormat::Json);
    }
}
