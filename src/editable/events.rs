//! Caret line/column change notifications for status displays.

use super::cursor::Position;

/// Emitted when the caret's line or column differs from the last observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    LineChanged(usize),
    ColumnChanged(usize),
}

/// Tracks the last reported caret position and queues change events.
///
/// A line change always reports the column as well, since the column is
/// relative to the new line.
#[derive(Debug, Clone, Default)]
pub struct CursorWatch {
    previous: Position,
    pending: Vec<CursorEvent>,
}

impl CursorWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, position: Position) {
        if position.line != self.previous.line {
            self.pending.push(CursorEvent::LineChanged(position.line));
            self.pending.push(CursorEvent::ColumnChanged(position.column));
        } else if position.column != self.previous.column {
            self.pending.push(CursorEvent::ColumnChanged(position.column));
        }
        self.previous = position;
    }

    /// Take all queued events in arrival order
    pub fn drain(&mut self) -> Vec<CursorEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
