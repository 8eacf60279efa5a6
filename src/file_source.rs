//! Document storage behind a narrow load/save interface

use std::fmt;
use std::io;
use std::path::Path;

use crate::error::EditError;

/// Largest document accepted from disk, in bytes
pub const MAX_DOCUMENT_BYTES: u64 = 16 * 1024 * 1024;

/// Why a document could not be read from disk
#[derive(Debug, Clone, PartialEq)]
pub enum FileOpenError {
    NotFound,
    PermissionDenied,
    IsDirectory,
    /// Contains NUL bytes or is not valid UTF-8
    BinaryFile,
    TooLarge { bytes: u64 },
    IoError(String),
}

impl FileOpenError {
    /// Status bar text, prefixed with the document name
    pub fn user_message(&self, filename: &str) -> String {
        format!("{}: {}", filename, self)
    }
}

impl From<io::Error> for FileOpenError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::IoError(e.to_string()),
        }
    }
}

impl fmt::Display for FileOpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no such document"),
            Self::PermissionDenied => write!(f, "not readable"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::BinaryFile => write!(f, "not a text document"),
            Self::TooLarge { bytes } => write!(
                f,
                "{} bytes exceeds the {} byte document limit",
                bytes, MAX_DOCUMENT_BYTES
            ),
            Self::IoError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FileOpenError {}

/// Read a whole document, rejecting directories, oversized files and binary content
pub fn read_document(path: &Path) -> Result<String, FileOpenError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(FileOpenError::IsDirectory);
    }
    if metadata.len() > MAX_DOCUMENT_BYTES {
        return Err(FileOpenError::TooLarge {
            bytes: metadata.len(),
        });
    }
    let bytes = std::fs::read(path)?;
    if bytes.contains(&0) {
        return Err(FileOpenError::BinaryFile);
    }
    String::from_utf8(bytes).map_err(|_| FileOpenError::BinaryFile)
}

/// Tab title for a path: its last component, or the whole path when it has none
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Where documents come from and go to
pub trait FileSource {
    fn load(&self, path: &Path) -> Result<String, EditError>;
    fn save(&self, path: &Path, text: &str) -> Result<(), EditError>;
}

/// Local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileSource;

impl FileSource for FsFileSource {
    fn load(&self, path: &Path) -> Result<String, EditError> {
        let text = read_document(path)?;
        tracing::debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }

    fn save(&self, path: &Path, text: &str) -> Result<(), EditError> {
        std::fs::write(path, text).map_err(|e| {
            EditError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::info!("Saved {}", path.display());
        Ok(())
    }
}
