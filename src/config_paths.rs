//! Centralized configuration paths for textbox
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/textbox/`
//! - Windows: `%APPDATA%\textbox\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::tracing::LOG_FILE_NAME;

const APP_DIR: &str = "textbox";

/// Base config directory for textbox
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/textbox`
///   - Else: `~/.config/textbox`
///
/// Windows:
///   - `%APPDATA%\textbox`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/textbox/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/textbox/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Returns the most recent log file in `~/.config/textbox/logs/`
/// (e.g., `textbox.log.2026-01-07`), falling back to `textbox.log`
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;
    newest_log_in(&logs_dir).or_else(|| Some(logs_dir.join(LOG_FILE_NAME)))
}

/// Daily rotation names files `textbox.log.YYYY-MM-DD`, which sort naturally
fn newest_log_in(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(LOG_FILE_NAME))
                .unwrap_or(false)
        })
        .max()
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_log_in() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["textbox.log.2026-01-02", "textbox.log.2026-01-09", "other.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        assert_eq!(
            newest_log_in(dir.path()).unwrap(),
            dir.path().join("textbox.log.2026-01-09")
        );
    }

    #[test]
    fn test_newest_log_in_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(newest_log_in(dir.path()), None);
    }
}
