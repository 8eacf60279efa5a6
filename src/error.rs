//! Error taxonomy for the editing engine and its collaborators
//!
//! Per-keystroke edits never fail: they clamp or become no-ops. Only document
//! load, paste, clipboard access and file I/O surface an [`EditError`].

use crate::clipboard::ClipboardError;
use crate::file_source::FileOpenError;

/// Errors returned to the host by load/paste/save style operations
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// The buffer would grow past its configured capacity
    CapacityExceeded { required: usize, capacity: usize },
    /// The platform clipboard could not be read or written
    ClipboardUnavailable(ClipboardError),
    /// A document could not be opened
    File(FileOpenError),
    /// A document could not be written
    Io(String),
}

impl EditError {
    /// Get a user-friendly error message for status bar display
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::CapacityExceeded { required, capacity } => format!(
                "{} is too large for the editor ({} characters, capacity {})",
                filename, required, capacity
            ),
            Self::ClipboardUnavailable(e) => format!("Clipboard unavailable: {}", e),
            Self::File(e) => e.user_message(filename),
            Self::Io(msg) => format!("Error saving {}: {}", filename, msg),
        }
    }
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded { required, capacity } => write!(
                f,
                "capacity exceeded ({} characters required, capacity {})",
                required, capacity
            ),
            Self::ClipboardUnavailable(e) => write!(f, "clipboard unavailable: {}", e),
            Self::File(e) => write!(f, "{}", e),
            Self::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EditError {}

impl From<FileOpenError> for EditError {
    fn from(e: FileOpenError) -> Self {
        Self::File(e)
    }
}

impl From<ClipboardError> for EditError {
    fn from(e: ClipboardError) -> Self {
        Self::ClipboardUnavailable(e)
    }
}
