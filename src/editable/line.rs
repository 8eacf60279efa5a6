//! Line table: the ordered, gap-free index of line spans over the buffer.
//!
//! Lines are stored in a flat arena addressed by index. Structural edits
//! (split/merge) perform bounded local shifts and then renumber the tail in a
//! single linear pass. Nothing outside this module holds a reference to a
//! line across a structural change; callers re-resolve by index.

use super::lexer::TokenStream;

/// Separator written between lines (CR+LF)
pub const LINE_SEPARATOR: [char; 2] = ['\r', '\n'];

/// Length of [`LINE_SEPARATOR`] in characters
pub const SEPARATOR_LEN: usize = LINE_SEPARATOR.len();

/// Initial number of line slots reserved for a new table
const INITIAL_LINE_SLOTS: usize = 50;

/// Vertical placement of lines, supplied by the host from its font size,
/// padding and widget origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub line_height: f32,
}

impl Layout {
    pub const fn new(origin_x: f32, origin_y: f32, line_height: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            line_height,
        }
    }

    /// Top edge of the line slot at `index`
    #[inline]
    pub fn line_origin(&self, index: usize) -> f32 {
        self.origin_y + index as f32 * self.line_height
    }

    /// Line slot containing vertical coordinate `y`, clamped to `[0, line_count)`
    pub fn line_at_y(&self, y: f32, line_count: usize) -> usize {
        if line_count == 0 || self.line_height <= 0.0 {
            return 0;
        }
        let slot = ((y - self.origin_y) / self.line_height).floor();
        if slot <= 0.0 {
            0
        } else {
            (slot as usize).min(line_count - 1)
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(0.0, 0.0, 12.0)
    }
}

/// One line span `[start, end)`, excluding its trailing separator
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Position in the table
    pub index: usize,
    pub start: usize,
    pub end: usize,
    /// End of the leading indentation run (`start <= indent_end <= end`)
    pub indent_end: usize,
    /// Cached top edge of this line's slot
    pub display_origin: f32,
    pub tokens: TokenStream,
}

impl Line {
    pub fn new(index: usize, start: usize, end: usize, display_origin: f32) -> Self {
        Self {
            index,
            start,
            end,
            indent_end: start,
            display_origin,
            tokens: TokenStream::new(),
        }
    }

    /// Number of characters in the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` is a valid caret position on this line
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Column of an absolute offset on this line
    pub fn column_of(&self, offset: usize) -> usize {
        offset.saturating_sub(self.start).min(self.len())
    }

    fn shift(&mut self, delta: isize) {
        self.start = self.start.saturating_add_signed(delta);
        self.end = self.end.saturating_add_signed(delta);
        self.indent_end = self.indent_end.saturating_add_signed(delta);
    }
}

/// Ordered sequence of line descriptors covering the whole buffer
#[derive(Debug, Clone)]
pub struct LineTable {
    lines: Vec<Line>,
    layout: Layout,
}

impl LineTable {
    /// Create a table seeded with a single empty line 0
    pub fn new(layout: Layout) -> Self {
        let mut lines = Vec::with_capacity(INITIAL_LINE_SLOTS);
        lines.push(Line::new(0, 0, 0, layout.line_origin(0)));
        Self { lines, layout }
    }

    /// Drop every line and reseed line 0
    pub fn reset(&mut self) {
        self.lines.clear();
        self.lines
            .push(Line::new(0, 0, 0, self.layout.line_origin(0)));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// A table always holds at least one line
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Replace the layout and restamp every display origin
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.renumber(0);
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    pub fn as_slice(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    pub fn last_index(&self) -> usize {
        self.lines.len() - 1
    }

    /// Add `delta` to the spans of every line from `first` onward
    pub fn shift_from(&mut self, first: usize, delta: isize) {
        if delta == 0 || first >= self.lines.len() {
            return;
        }
        for line in &mut self.lines[first..] {
            line.shift(delta);
        }
    }

    /// Split line `index` at `at_offset`.
    ///
    /// The separator must already be in the buffer at `at_offset`. The line is
    /// truncated to `at_offset`, a new line covering the remainder is inserted
    /// right after it, and every later line moves down one slot. Returns the
    /// new line's index.
    pub fn split(&mut self, index: usize, at_offset: usize) -> usize {
        let line = &mut self.lines[index];
        debug_assert!(
            line.contains(at_offset),
            "split offset {} outside line {} [{}, {})",
            at_offset,
            index,
            line.start,
            line.end
        );
        let old_end = line.end;
        line.end = at_offset;
        line.indent_end = line.indent_end.min(at_offset);

        let new_index = index + 1;
        self.shift_from(new_index, SEPARATOR_LEN as isize);
        let new_start = at_offset + SEPARATOR_LEN;
        self.lines.insert(
            new_index,
            Line::new(
                new_index,
                new_start,
                old_end + SEPARATOR_LEN,
                self.layout.line_origin(new_index),
            ),
        );
        self.renumber(new_index + 1);
        new_index
    }

    /// Fold line `index` into the previous line.
    ///
    /// The separator between them must already be removed from the buffer;
    /// `index` still holds its pre-removal offsets. Returns the previous
    /// line's index.
    pub fn merge(&mut self, index: usize) -> usize {
        debug_assert!(index > 0, "cannot merge line 0 upward");
        let removed = self.lines.remove(index);
        let prev = index - 1;
        self.lines[prev].end = removed.end - SEPARATOR_LEN;
        self.shift_from(index, -(SEPARATOR_LEN as isize));
        self.renumber(index);
        prev
    }

    /// Reassign `index` and `display_origin` from `first` to the end, in one pass
    pub fn renumber(&mut self, first: usize) {
        let layout = self.layout;
        for (i, line) in self.lines.iter_mut().enumerate().skip(first) {
            line.index = i;
            line.display_origin = layout.line_origin(i);
        }
    }

    /// Index of the line whose span contains `offset` (binary search)
    pub fn line_at_offset(&self, offset: usize) -> usize {
        let after = self.lines.partition_point(|line| line.start <= offset);
        after.saturating_sub(1)
    }

    /// Index of the line slot under vertical coordinate `y`
    pub fn line_at_y(&self, y: f32) -> usize {
        self.layout.line_at_y(y, self.lines.len())
    }

    /// Debug-only structural check: lines are contiguous, ordered and cover
    /// `[0, buffer_len)`
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, buffer_len: usize) {
        debug_assert!(!self.lines.is_empty(), "line table must hold line 0");
        debug_assert_eq!(self.lines[0].start, 0, "line 0 must start at 0");
        for (i, line) in self.lines.iter().enumerate() {
            debug_assert_eq!(line.index, i, "line {} has stale index", i);
            debug_assert!(
                line.start <= line.indent_end && line.indent_end <= line.end,
                "line {} indent {} outside [{}, {}]",
                i,
                line.indent_end,
                line.start,
                line.end
            );
            if let Some(next) = self.lines.get(i + 1) {
                debug_assert_eq!(
                    line.end + SEPARATOR_LEN,
                    next.start,
                    "gap between line {} and {}",
                    i,
                    i + 1
                );
            }
        }
        debug_assert_eq!(
            self.lines[self.lines.len() - 1].end,
            buffer_len,
            "lines must cover the buffer"
        );
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self, _buffer_len: usize) {}
}

impl std::ops::Index<usize> for LineTable {
    type Output = Line;

    fn index(&self, index: usize) -> &Line {
        &self.lines[index]
    }
}
