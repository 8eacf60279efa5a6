//! Platform clipboard access
//!
//! The engine only needs a narrow synchronous read/write interface. Writing is
//! not supported by the system accessor yet; it reports
//! [`ClipboardError::WriteUnsupported`] instead of silently dropping text.

/// Clipboard failures; all are recoverable and leave the editor untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The platform clipboard could not be opened or read
    Unavailable(String),
    /// The clipboard holds no text
    Empty,
    /// This accessor cannot write to the clipboard
    WriteUnsupported,
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "{}", msg),
            Self::Empty => write!(f, "clipboard is empty"),
            Self::WriteUnsupported => write!(f, "writing to the clipboard is not supported"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Synchronous clipboard interface supplied by the host
pub trait ClipboardAccessor {
    fn read(&mut self) -> Result<String, ClipboardError>;

    /// Write text to the clipboard. Accessors without write support keep the
    /// default, which reports the gap.
    fn write(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::WriteUnsupported)
    }
}

/// System clipboard via arboard (read-only)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardAccessor for SystemClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        match clipboard.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
            Err(e) => Err(ClipboardError::Unavailable(e.to_string())),
        }
    }
}

/// In-process clipboard for headless hosts and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            contents: Some(text.to_string()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardAccessor for MemoryClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        self.contents.clone().ok_or(ClipboardError::Empty)
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnly;

    impl ClipboardAccessor for ReadOnly {
        fn read(&mut self) -> Result<String, ClipboardError> {
            Ok("x".into())
        }
    }

    #[test]
    fn test_default_write_is_unsupported() {
        assert_eq!(ReadOnly.write("a"), Err(ClipboardError::WriteUnsupported));
    }

    #[test]
    fn test_memory_clipboard() {
        let mut clip = MemoryClipboard::new();
        assert_eq!(clip.read(), Err(ClipboardError::Empty));
        clip.write("hello").unwrap();
        assert_eq!(clip.read().unwrap(), "hello");
        assert_eq!(clip.contents(), Some("hello"));
    }
}
