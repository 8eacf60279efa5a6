//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/textbox/config.yaml`

use serde::{Deserialize, Serialize};

use crate::editable::DEFAULT_KEYWORDS;
use crate::util::text::DEFAULT_WORD_TERMINALS;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of characters a document may hold
    pub capacity: usize,
    /// Spaces per indent unit
    pub tab_size: usize,
    /// Indent with a tab character instead of spaces
    pub indent_with_tabs: bool,
    /// Replay the current indentation on Enter
    pub auto_indent: bool,
    /// When false, Enter is ignored and multi-line pastes are rejected
    pub multiline: bool,
    /// Maintain per-line token streams
    pub syntax_highlight: bool,
    /// Font size passed to the glyph metrics provider
    pub text_size: f32,
    /// Extra vertical space between lines
    pub line_padding: f32,
    /// Inset of the text area inside the widget
    pub margin: f32,
    /// Words lexed as keywords
    pub keywords: Vec<String>,
    /// Delimiters bounding word motion
    pub word_terminals: Vec<char>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            capacity: 4 * 1024 * 1024,
            tab_size: 2,
            indent_with_tabs: false,
            auto_indent: true,
            multiline: true,
            syntax_highlight: true,
            text_size: 12.0,
            line_padding: 0.0,
            margin: 10.0,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            word_terminals: DEFAULT_WORD_TERMINALS.to_vec(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse a config document; missing fields take their defaults
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = self.to_yaml()?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Characters inserted by one Indent
    pub fn indent_unit(&self) -> Vec<char> {
        if self.indent_with_tabs {
            vec!['\t']
        } else {
            vec![' '; self.tab_size.max(1)]
        }
    }

    /// Distance between consecutive line origins
    pub fn line_height(&self) -> f32 {
        self.text_size + self.line_padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_unit() {
        let mut config = EditorConfig::default();
        assert_eq!(config.indent_unit(), vec![' ', ' ']);
        config.indent_with_tabs = true;
        assert_eq!(config.indent_unit(), vec!['\t']);
        config.indent_with_tabs = false;
        config.tab_size = 0;
        assert_eq!(config.indent_unit(), vec![' ']);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = EditorConfig::from_yaml("tab_size: 4\nauto_indent: false\n").unwrap();
        assert_eq!(config.tab_size, 4);
        assert!(!config.auto_indent);
        assert_eq!(config.capacity, EditorConfig::default().capacity);
        assert!(config.keywords.iter().any(|k| k == "func"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = EditorConfig {
            keywords: vec!["fn".into(), "let".into()],
            ..EditorConfig::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(EditorConfig::from_yaml(&yaml).unwrap(), config);
    }
}
