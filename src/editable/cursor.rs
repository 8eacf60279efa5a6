//! Caret and position types for the editing engine.

/// A position in the text buffer (line and column, both 0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }

    /// 1-indexed (line, column) for status display
    pub const fn display(&self) -> (usize, usize) {
        (self.line + 1, self.column + 1)
    }
}

/// The insertion point.
///
/// `line_index` addresses the owning line in the line table; the line itself
/// is always re-resolved from the table, never cached here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cursor {
    /// Absolute buffer offset
    pub caret: usize,
    pub line_index: usize,
    /// Indent units carried to a new line on Enter
    pub indent_level: usize,
    /// Horizontal offset of the caret from the line origin
    pub x: f32,
    /// Desired column for vertical movement.
    /// When moving up/down through lines of varying length, this preserves
    /// the "intended" column position even when a shorter line is traversed.
    pub desired_column: Option<usize>,
}

impl Cursor {
    pub const fn new(caret: usize, line_index: usize) -> Self {
        Self {
            caret,
            line_index,
            indent_level: 0,
            x: 0.0,
            desired_column: None,
        }
    }

    /// Clear desired column (call after horizontal movement or edits)
    pub fn clear_desired_column(&mut self) {
        self.desired_column = None;
    }

    /// Remember `column` as the desired column unless one is already set
    pub fn set_desired_column(&mut self, column: usize) {
        if self.desired_column.is_none() {
            self.desired_column = Some(column);
        }
    }

    /// Get the effective column for positioning (uses desired_column if set)
    pub fn effective_column(&self, column: usize) -> usize {
        self.desired_column.unwrap_or(column)
    }
}
