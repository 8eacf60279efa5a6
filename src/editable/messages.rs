//! Input intents understood by the editing engine.
//!
//! Mapping raw platform keys to these is the host's job.

/// Target for cursor movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move one line up
    Up,
    /// Move one line down
    Down,
    /// Move to start of line
    LineStart,
    /// Move to end of line
    LineEnd,
    /// Move one word left
    WordLeft,
    /// Move one word right
    WordRight,
    /// Move to start of document
    DocumentStart,
    /// Move to end of document
    DocumentEnd,
}

/// Keys the engine reacts to on press and on auto-repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKey {
    Enter,
    Backspace,
    /// Shift+Backspace: remove one indent unit
    ShiftBackspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    WordLeft,
    WordRight,
    Home,
    End,
}

/// Unified message type for all text editing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TextEditMsg {
    /// Move the caret
    Move(MoveTarget),
    /// Insert a single character (line breaks split the line)
    InsertChar(char),
    /// Insert a line break at the caret
    InsertNewline,
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Insert one indent unit
    Indent,
    /// Remove one indent unit
    Outdent,
    /// Insert a string, splitting at embedded line breaks
    Paste(String),
    /// Place the caret under a pointer position
    MouseDown { x: f32, y: f32 },
    /// Advance the caret blink timer by one frame
    Tick,
}

impl TextEditMsg {
    /// Check if this message may modify the buffer
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            TextEditMsg::InsertChar(_)
                | TextEditMsg::InsertNewline
                | TextEditMsg::DeleteBackward
                | TextEditMsg::Indent
                | TextEditMsg::Outdent
                | TextEditMsg::Paste(_)
        )
    }

    /// Check if this message is periodic noise not worth logging
    pub fn is_noisy(&self) -> bool {
        matches!(self, TextEditMsg::Tick)
    }
}

impl From<EditKey> for TextEditMsg {
    fn from(key: EditKey) -> Self {
        match key {
            EditKey::Enter => TextEditMsg::InsertNewline,
            EditKey::Backspace => TextEditMsg::DeleteBackward,
            EditKey::ShiftBackspace => TextEditMsg::Outdent,
            EditKey::Tab => TextEditMsg::Indent,
            EditKey::Up => TextEditMsg::Move(MoveTarget::Up),
            EditKey::Down => TextEditMsg::Move(MoveTarget::Down),
            EditKey::Left => TextEditMsg::Move(MoveTarget::Left),
            EditKey::Right => TextEditMsg::Move(MoveTarget::Right),
            EditKey::WordLeft => TextEditMsg::Move(MoveTarget::WordLeft),
            EditKey::WordRight => TextEditMsg::Move(MoveTarget::WordRight),
            EditKey::Home => TextEditMsg::Move(MoveTarget::LineStart),
            EditKey::End => TextEditMsg::Move(MoveTarget::LineEnd),
        }
    }
}
