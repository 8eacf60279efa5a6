//! File source tests - loading and saving documents through the engine

mod common;

use std::path::Path;

use common::{test_engine, test_engine_at};
use textbox::editable::LineEnding;
use textbox::file_source::{FileOpenError, FileSource, FsFileSource};
use textbox::EditError;

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.go");
    std::fs::write(&path, "package a\nfunc f() {}\n").unwrap();

    let mut engine = test_engine("");
    engine.load_from(&FsFileSource, &path).unwrap();
    assert_eq!(engine.line_count(), 3);
    assert_eq!(engine.line_ending(), LineEnding::Lf);
}

#[test]
fn test_save_preserves_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    for original in ["a\nb\n", "a\r\nb\r\n", "a\rb\r"] {
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, original).unwrap();
        let mut engine = test_engine("");
        engine.load_from(&FsFileSource, &path).unwrap();
        engine.save(&FsFileSource, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}

#[test]
fn test_failed_load_keeps_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = test_engine_at("keep", 0, 2);

    let err = engine
        .load_from(&FsFileSource, &dir.path().join("missing.go"))
        .unwrap_err();
    assert_eq!(err, EditError::File(FileOpenError::NotFound));
    assert_eq!(engine.text(), "keep");
    assert_eq!(engine.caret(), 2);
}

#[test]
fn test_binary_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    std::fs::write(&path, b"ab\x00cd").unwrap();

    let mut engine = test_engine("");
    let err = engine.load_from(&FsFileSource, &path).unwrap_err();
    assert_eq!(err, EditError::File(FileOpenError::BinaryFile));
    assert_eq!(err.user_message("blob.bin"), "blob.bin: not a text document");
}

/// Records saves instead of touching the disk
#[derive(Default)]
struct RecordingSource {
    saved: std::cell::RefCell<Vec<String>>,
}

impl FileSource for RecordingSource {
    fn load(&self, _path: &Path) -> Result<String, EditError> {
        Ok("one\ntwo".to_string())
    }

    fn save(&self, _path: &Path, text: &str) -> Result<(), EditError> {
        self.saved.borrow_mut().push(text.to_string());
        Ok(())
    }
}

#[test]
fn test_custom_file_source() {
    let source = RecordingSource::default();
    let mut engine = test_engine("");
    engine.load_from(&source, Path::new("virtual")).unwrap();
    engine.insert_char('!');
    engine.save(&source, Path::new("virtual")).unwrap();
    assert_eq!(source.saved.borrow().as_slice(), ["one\ntwo!".to_string()]);
}
