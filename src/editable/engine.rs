//! EditingEngine - the editing widget's model.
//!
//! Owns the character buffer, the line table, the per-line token streams and
//! the caret, and applies every operation to all of them in lock-step: when a
//! public method returns, the line table covers the buffer exactly, only the
//! touched lines have been relexed, and the caret sits inside its line.

use std::ops::Range;
use std::path::Path;

use crate::clipboard::ClipboardAccessor;
use crate::config::EditorConfig;
use crate::error::EditError;
use crate::file_source::FileSource;
use crate::util::text::{
    indent_units, is_line_break, leading_indent_len, outdent_width, split_line_breaks,
};

use super::buffer::TextBuffer;
use super::cursor::{Cursor, Position};
use super::events::{CursorEvent, CursorWatch};
use super::lexer::{Lexer, Token};
use super::line::{Layout, Line, LineTable, LINE_SEPARATOR, SEPARATOR_LEN};
use super::messages::{EditKey, MoveTarget, TextEditMsg};
use super::metrics::GlyphMetrics;

/// Frames between caret visibility toggles
pub const BLINK_TICKS: u32 = 45;

/// Width of the caret rectangle
pub const CARET_WIDTH: f32 = 2.0;

/// Line break style found in a loaded document, used when saving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
    Cr,
}

impl LineEnding {
    /// Style of the first line break in `text` (CRLF when there is none)
    pub fn detect(text: &str) -> Self {
        let Some(pos) = text.find(&['\r', '\n'][..]) else {
            return Self::CrLf;
        };
        let bytes = text.as_bytes();
        match (bytes[pos], bytes.get(pos + 1)) {
            (b'\r', Some(b'\n')) => Self::CrLf,
            (b'\r', _) => Self::Cr,
            _ => Self::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
            Self::Cr => "\r",
        }
    }
}

/// Engine settings resolved from [`EditorConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub capacity: usize,
    pub indent_unit: Vec<char>,
    pub tab_size: usize,
    pub auto_indent: bool,
    pub multiline: bool,
    pub syntax_highlight: bool,
    pub text_size: f32,
    pub margin: f32,
    pub line_height: f32,
    pub word_terminals: Vec<char>,
}

impl From<&EditorConfig> for EngineOptions {
    fn from(config: &EditorConfig) -> Self {
        Self {
            capacity: config.capacity,
            indent_unit: config.indent_unit(),
            tab_size: config.tab_size.max(1),
            auto_indent: config.auto_indent,
            multiline: config.multiline,
            syntax_highlight: config.syntax_highlight,
            text_size: config.text_size,
            margin: config.margin,
            line_height: config.line_height(),
            word_terminals: config.word_terminals.clone(),
        }
    }
}

/// Caret rectangle in the host's coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One visible line, borrowed from the engine for a single frame
#[derive(Debug, Clone, Copy)]
pub struct RenderLine<'a> {
    pub index: usize,
    pub text: &'a [char],
    pub tokens: &'a [Token],
    pub origin_y: f32,
    pub is_current: bool,
}

#[derive(Debug, Clone, Copy)]
struct Blink {
    visible: bool,
    timer: u32,
}

impl Default for Blink {
    fn default() -> Self {
        Self {
            visible: true,
            timer: 0,
        }
    }
}

impl Blink {
    /// Returns true when visibility toggled
    fn tick(&mut self) -> bool {
        self.timer += 1;
        if self.timer >= BLINK_TICKS {
            self.timer = 0;
            self.visible = !self.visible;
            return true;
        }
        false
    }

    fn reset(&mut self) {
        self.visible = true;
        self.timer = 0;
    }
}

/// Editable text with a live line index, incremental lexing and a caret.
///
/// Generic over the glyph metrics provider used to place the caret and size tokens.
#[derive(Debug, Clone)]
pub struct EditingEngine<M: GlyphMetrics> {
    buffer: TextBuffer,
    lines: LineTable,
    cursor: Cursor,
    lexer: Lexer,
    metrics: M,
    options: EngineOptions,
    line_ending: LineEnding,
    blink: Blink,
    watch: CursorWatch,
    /// The last typed character was a CR, so an immediate LF is its pair
    after_typed_cr: bool,
}

impl<M: GlyphMetrics> EditingEngine<M> {
    /// Create an empty document (one empty line)
    pub fn new(config: &EditorConfig, metrics: M) -> Self {
        let options = EngineOptions::from(config);
        let layout = Layout::new(options.margin, options.margin, options.line_height);
        Self {
            buffer: TextBuffer::new(options.capacity),
            lines: LineTable::new(layout),
            cursor: Cursor::new(0, 0),
            lexer: Lexer::new(config.keywords.iter().cloned()),
            metrics,
            options,
            line_ending: LineEnding::default(),
            blink: Blink::default(),
            watch: CursorWatch::new(),
            after_typed_cr: false,
        }
    }

    /// Create an engine and load `text` into it
    pub fn with_text(config: &EditorConfig, metrics: M, text: &str) -> Result<Self, EditError> {
        let mut engine = Self::new(config, metrics);
        engine.load_document(text)?;
        Ok(engine)
    }

    /// Full content with CR+LF separators
    pub fn text(&self) -> String {
        self.buffer.content()
    }

    /// Full content re-encoded with the line ending detected at load
    pub fn text_for_save(&self) -> String {
        match self.line_ending {
            LineEnding::CrLf => self.text(),
            ending => self.text().replace("\r\n", ending.as_str()),
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn line_table(&self) -> &LineTable {
        &self.lines
    }

    pub fn lines(&self) -> &[Line] {
        self.lines.as_slice()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Characters of a line, without its separator
    pub fn line_chars(&self, index: usize) -> Option<&[char]> {
        self.lines
            .get(index)
            .map(|line| self.buffer.slice(line.start..line.end))
    }

    pub fn line_text(&self, index: usize) -> Option<String> {
        self.line_chars(index).map(|chars| chars.iter().collect())
    }

    pub fn tokens(&self, index: usize) -> Option<&[Token]> {
        self.lines.get(index).map(|line| line.tokens.as_slice())
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn caret(&self) -> usize {
        self.cursor.caret
    }

    /// Index of the caret's line
    pub fn current_line(&self) -> usize {
        self.cursor.line_index
    }

    /// Caret column within its line
    pub fn current_column(&self) -> usize {
        self.cursor.caret - self.current().start
    }

    pub fn position(&self) -> Position {
        Position::new(self.current_line(), self.current_column())
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    pub fn layout(&self) -> Layout {
        self.lines.layout()
    }

    /// Move the widget origin; the text area is inset by the margin
    pub fn set_origin(&mut self, x: f32, y: f32) {
        let margin = self.options.margin;
        self.lines
            .set_layout(Layout::new(x + margin, y + margin, self.options.line_height));
    }

    /// Replace the keyword set and relex every line
    pub fn set_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lexer.set_keywords(keywords);
        self.relex_range(0, self.lines.last_index());
    }

    fn current(&self) -> &Line {
        &self.lines[self.cursor.line_index]
    }

    fn advance(&self, ch: char) -> f32 {
        self.metrics.advance(ch, self.options.text_size)
    }

    fn width_of(&self, range: Range<usize>) -> f32 {
        self.metrics
            .run_width(self.buffer.slice(range), self.options.text_size)
    }

    fn is_terminal(&self, ch: char) -> bool {
        self.options.word_terminals.contains(&ch)
    }

    /// Recompute the cached caret X from the line start
    fn refresh_x(&mut self) {
        self.cursor.x = self.width_of(self.current().start..self.cursor.caret);
    }
}

// =============================================================================
// Structural primitives: buffer + line table + caret, no relex
// =============================================================================

impl<M: GlyphMetrics> EditingEngine<M> {
    /// Insert a run without line breaks at the caret
    fn raw_insert(&mut self, chars: &[char]) -> Result<(), EditError> {
        if chars.is_empty() {
            return Ok(());
        }
        let index = self.cursor.line_index;
        let caret = self.cursor.caret;
        match chars {
            [ch] => self.buffer.insert_at(caret, *ch)?,
            _ => self.buffer.insert_slice(caret, chars)?,
        }
        let count = chars.len();
        if let Some(line) = self.lines.get_mut(index) {
            line.end += count;
        }
        self.lines.shift_from(index + 1, count as isize);
        self.cursor.caret += count;
        self.cursor.x += self.metrics.run_width(chars, self.options.text_size);
        Ok(())
    }

    /// Remove `count` characters before the caret, within the current line
    fn raw_remove_before(&mut self, count: usize) {
        let index = self.cursor.line_index;
        let caret = self.cursor.caret;
        debug_assert!(caret >= self.current().start + count);
        let width = self.width_of(caret - count..caret);
        if count == 1 {
            self.buffer.delete_at(caret);
        } else {
            self.buffer.remove_range(caret - count..caret);
        }
        if let Some(line) = self.lines.get_mut(index) {
            line.end -= count;
        }
        self.lines.shift_from(index + 1, -(count as isize));
        self.cursor.caret -= count;
        self.cursor.x = (self.cursor.x - width).max(0.0);
    }

    /// Insert a separator at the caret and move onto the new line
    fn raw_split(&mut self) -> Result<(), EditError> {
        let index = self.cursor.line_index;
        let caret = self.cursor.caret;
        self.buffer.insert_slice(caret, &LINE_SEPARATOR)?;
        let new_index = self.lines.split(index, caret);
        self.cursor.line_index = new_index;
        self.cursor.caret = self.lines[new_index].start;
        self.cursor.x = 0.0;
        Ok(())
    }

    /// Remove the separator before the current line and fold it into the previous one
    fn raw_merge(&mut self) {
        let index = self.cursor.line_index;
        debug_assert!(index > 0);
        let join = self.lines[index - 1].end;
        self.buffer.remove_range(join..join + SEPARATOR_LEN);
        let prev = self.lines.merge(index);
        self.cursor.line_index = prev;
        self.cursor.caret = join;
        self.refresh_x();
    }

    /// Insert line segments, splitting between each
    fn stream_segments(&mut self, segments: &[&[char]]) -> Result<(), EditError> {
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                self.raw_split()?;
            }
            self.raw_insert(segment)?;
        }
        Ok(())
    }

    /// Rebuild one line's indentation boundary and token stream
    fn relex_line(&mut self, index: usize) {
        let has_separator = index + 1 < self.lines.len();
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };
        let text = self.buffer.slice(line.start..line.end);
        line.indent_end = line.start + leading_indent_len(text);
        if self.options.syntax_highlight {
            self.lexer.relex(
                &mut line.tokens,
                text,
                has_separator,
                &self.metrics,
                self.options.text_size,
            );
        } else {
            line.tokens.clear();
        }
    }

    fn relex_range(&mut self, first: usize, last: usize) {
        for index in first..=last {
            self.relex_line(index);
        }
    }

    fn sync_indent_level(&mut self) {
        let line = self.current();
        let indent = self.buffer.slice(line.start..line.indent_end);
        self.cursor.indent_level = indent_units(indent, self.options.tab_size);
    }

    /// Common tail of every operation
    fn finish(&mut self) {
        self.sync_indent_level();
        self.blink.reset();
        self.watch.observe(self.position());
        self.lines.assert_invariants(self.buffer.len());
        debug_assert!(
            self.current().contains(self.cursor.caret),
            "caret {} outside line {}",
            self.cursor.caret,
            self.cursor.line_index
        );
    }
}

fn required_len(segments: &[&[char]]) -> usize {
    let chars: usize = segments.iter().map(|s| s.len()).sum();
    chars + (segments.len() - 1) * SEPARATOR_LEN
}

// =============================================================================
// Editing operations
// =============================================================================

impl<M: GlyphMetrics> EditingEngine<M> {
    /// Replace the document with `text`, normalizing line breaks to CR+LF.
    ///
    /// Fails without touching the current document when the normalized text
    /// does not fit the capacity. The caret ends at the end of the document.
    pub fn load_document(&mut self, text: &str) -> Result<(), EditError> {
        let chars: Vec<char> = text.chars().collect();
        let segments = split_line_breaks(&chars);
        let required = required_len(&segments);
        if required > self.buffer.capacity() {
            tracing::warn!(
                required,
                capacity = self.buffer.capacity(),
                "document rejected: capacity exceeded"
            );
            return Err(EditError::CapacityExceeded {
                required,
                capacity: self.buffer.capacity(),
            });
        }

        self.line_ending = LineEnding::detect(text);
        self.buffer.clear();
        self.lines.reset();
        self.cursor = Cursor::new(0, 0);
        self.stream_segments(&segments)?;
        self.relex_range(0, self.lines.last_index());
        self.finish();

        tracing::debug!(
            chars = self.buffer.len(),
            lines = self.lines.len(),
            ending = ?self.line_ending,
            "loaded document"
        );
        Ok(())
    }

    /// Insert a character at the caret. Line breaks split the line.
    ///
    /// Returns false when the capacity is reached.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if is_line_break(ch) {
            return self.insert_line();
        }
        let index = self.cursor.line_index;
        if let Err(e) = self.raw_insert(&[ch]) {
            tracing::trace!(%e, "insert rejected");
            return false;
        }
        self.cursor.clear_desired_column();
        self.relex_line(index);
        self.finish();
        true
    }

    /// Backspace. Inside leading indentation a whole indent unit goes at once;
    /// at a line start the line is merged into the previous one.
    pub fn delete_char(&mut self) -> bool {
        if self.at_indent_boundary() {
            return self.outdent();
        }
        self.delete_plain()
    }

    /// Indent units left of the caret. Blanks to the right of the caret move
    /// with the split and keep their own width.
    fn indent_before_caret(&self) -> usize {
        let line = self.current();
        let end = self.cursor.caret.min(line.indent_end);
        indent_units(self.buffer.slice(line.start..end), self.options.tab_size)
    }

    fn at_indent_boundary(&self) -> bool {
        let line = self.current();
        self.cursor.caret == line.indent_end && self.cursor.caret > line.start
    }

    fn delete_plain(&mut self) -> bool {
        let caret = self.cursor.caret;
        if caret == 0 {
            return false;
        }
        let index = self.cursor.line_index;
        if caret == self.lines[index].start {
            self.raw_merge();
            self.relex_line(self.cursor.line_index);
            tracing::debug!(line = index, "merged line into previous");
        } else {
            self.raw_remove_before(1);
            self.relex_line(index);
        }
        self.cursor.clear_desired_column();
        self.finish();
        true
    }

    /// Enter: split the line at the caret, then replay the indentation when
    /// auto-indent is on
    pub fn insert_line(&mut self) -> bool {
        if !self.options.multiline {
            return false;
        }
        let index = self.cursor.line_index;
        let level = if self.options.auto_indent {
            self.indent_before_caret()
        } else {
            0
        };
        let unit = self.options.indent_unit.clone();
        if let Err(e) = self
            .buffer
            .ensure_room(SEPARATOR_LEN + level * unit.len())
        {
            tracing::trace!(%e, "line split rejected");
            return false;
        }
        if self.raw_split().is_err() {
            return false;
        }
        for _ in 0..level {
            if self.raw_insert(&unit).is_err() {
                break;
            }
        }
        self.relex_line(index);
        self.relex_line(index + 1);
        self.cursor.clear_desired_column();
        self.finish();
        tracing::trace!(line = index + 1, indent = level, "split line");
        true
    }

    /// Tab: insert one indent unit. At the indentation boundary this deepens
    /// the line's indent level; elsewhere it is plain text.
    pub fn indent(&mut self) -> bool {
        let index = self.cursor.line_index;
        let unit = self.options.indent_unit.clone();
        if let Err(e) = self.raw_insert(&unit) {
            tracing::trace!(%e, "indent rejected");
            return false;
        }
        self.relex_line(index);
        self.cursor.clear_desired_column();
        self.finish();
        true
    }

    /// Remove one indent unit when the caret is at the indentation boundary;
    /// otherwise behave like a plain backspace
    pub fn outdent(&mut self) -> bool {
        if !self.at_indent_boundary() {
            return self.delete_plain();
        }
        let line = self.current();
        let width = outdent_width(
            self.buffer.slice(line.start..self.cursor.caret),
            &self.options.indent_unit,
        );
        if width == 0 {
            return false;
        }
        let index = self.cursor.line_index;
        self.raw_remove_before(width);
        self.relex_line(index);
        self.cursor.clear_desired_column();
        self.finish();
        true
    }

    /// Insert `text` at the caret, splitting at every CR, LF or CR+LF.
    ///
    /// Atomic with respect to capacity: either everything is inserted or
    /// nothing is. Returns `Ok(false)` when a multi-line paste is refused by
    /// a single-line editor.
    pub fn paste(&mut self, text: &str) -> Result<bool, EditError> {
        if text.is_empty() {
            return Ok(true);
        }
        let chars: Vec<char> = text.chars().collect();
        let segments = split_line_breaks(&chars);
        let breaks = segments.len() - 1;
        if breaks > 0 && !self.options.multiline {
            tracing::debug!("multi-line paste refused by single-line editor");
            return Ok(false);
        }
        let required = required_len(&segments);
        self.buffer.ensure_room(required)?;

        let first = self.cursor.line_index;
        self.stream_segments(&segments)?;
        self.relex_range(first, self.cursor.line_index);
        self.cursor.clear_desired_column();
        self.finish();

        tracing::debug!(chars = required, breaks, "pasted");
        Ok(true)
    }

    /// Paste from a clipboard. A failed read leaves the document untouched.
    pub fn paste_from(&mut self, clipboard: &mut dyn ClipboardAccessor) -> Result<bool, EditError> {
        let text = clipboard.read().map_err(|e| {
            tracing::warn!("Clipboard read failed: {}", e);
            EditError::ClipboardUnavailable(e)
        })?;
        self.paste(&text)
    }

    /// Copy the current line's text to a clipboard
    pub fn copy_line_to(&self, clipboard: &mut dyn ClipboardAccessor) -> Result<(), EditError> {
        let text: String = self.buffer.slice(self.current().start..self.current().end).iter().collect();
        clipboard.write(&text).map_err(|e| {
            tracing::warn!("Clipboard write failed: {}", e);
            EditError::ClipboardUnavailable(e)
        })
    }

    /// Load a document from a file source
    pub fn load_from(&mut self, source: &dyn FileSource, path: &Path) -> Result<(), EditError> {
        let text = source.load(path)?;
        self.load_document(&text)
    }

    /// Save the document through a file source
    pub fn save(&self, source: &dyn FileSource, path: &Path) -> Result<(), EditError> {
        source.save(path, &self.text_for_save())
    }
}

// =============================================================================
// Navigation
// =============================================================================

impl<M: GlyphMetrics> EditingEngine<M> {
    pub fn move_left(&mut self) {
        let caret = self.cursor.caret;
        if caret > self.current().start {
            if let Some(ch) = self.buffer.char_at(caret - 1) {
                self.cursor.x = (self.cursor.x - self.advance(ch)).max(0.0);
            }
            self.cursor.caret -= 1;
        } else if self.cursor.line_index > 0 {
            self.cursor.line_index -= 1;
            self.cursor.caret = self.current().end;
            self.refresh_x();
        }
        self.cursor.clear_desired_column();
        self.finish();
    }

    pub fn move_right(&mut self) {
        let caret = self.cursor.caret;
        if caret < self.current().end {
            if let Some(ch) = self.buffer.char_at(caret) {
                self.cursor.x += self.advance(ch);
            }
            self.cursor.caret += 1;
        } else if self.cursor.line_index + 1 < self.lines.len() {
            self.cursor.line_index += 1;
            self.cursor.caret = self.current().start;
            self.cursor.x = 0.0;
        }
        self.cursor.clear_desired_column();
        self.finish();
    }

    pub fn move_up(&mut self) {
        if self.cursor.line_index > 0 {
            self.move_vertical(self.cursor.line_index - 1);
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor.line_index + 1 < self.lines.len() {
            self.move_vertical(self.cursor.line_index + 1);
        }
    }

    /// Sticky column: keep the remembered column, clamped to the target line
    fn move_vertical(&mut self, target: usize) {
        let column = self.current_column();
        self.cursor.set_desired_column(column);
        let wanted = self.cursor.effective_column(column);
        let line = &self.lines[target];
        self.cursor.caret = line.start + wanted.min(line.len());
        self.cursor.line_index = target;
        self.refresh_x();
        self.finish();
    }

    pub fn move_line_start(&mut self) {
        self.cursor.caret = self.current().start;
        self.cursor.x = 0.0;
        self.cursor.clear_desired_column();
        self.finish();
    }

    pub fn move_line_end(&mut self) {
        self.cursor.caret = self.current().end;
        self.refresh_x();
        self.cursor.clear_desired_column();
        self.finish();
    }

    pub fn move_document_start(&mut self) {
        self.cursor.line_index = 0;
        self.cursor.caret = 0;
        self.cursor.x = 0.0;
        self.cursor.clear_desired_column();
        self.finish();
    }

    pub fn move_document_end(&mut self) {
        self.cursor.line_index = self.lines.last_index();
        self.cursor.caret = self.current().end;
        self.refresh_x();
        self.cursor.clear_desired_column();
        self.finish();
    }

    /// Jump to the next terminal symbol. Starting on a terminal consumes just
    /// that one symbol; at the line end the jump crosses to the next line.
    pub fn move_word_right(&mut self) {
        let caret = self.cursor.caret;
        let end = self.current().end;
        if caret >= end {
            if self.cursor.line_index + 1 < self.lines.len() {
                self.cursor.line_index += 1;
                self.cursor.caret = self.current().start;
                self.cursor.x = 0.0;
            }
        } else {
            let text = self.buffer.slice(caret..end);
            let step = if self.is_terminal(text[0]) {
                1
            } else {
                text.iter()
                    .position(|ch| self.is_terminal(*ch))
                    .unwrap_or(text.len())
            };
            self.cursor.x += self.width_of(caret..caret + step);
            self.cursor.caret += step;
        }
        self.cursor.clear_desired_column();
        self.finish();
    }

    /// Mirror of [`move_word_right`](Self::move_word_right)
    pub fn move_word_left(&mut self) {
        let caret = self.cursor.caret;
        let start = self.current().start;
        if caret <= start {
            if self.cursor.line_index > 0 {
                self.cursor.line_index -= 1;
                self.cursor.caret = self.current().end;
                self.refresh_x();
            }
        } else {
            let text = self.buffer.slice(start..caret);
            let step = if self.is_terminal(text[text.len() - 1]) {
                1
            } else {
                text.iter()
                    .rev()
                    .position(|ch| self.is_terminal(*ch))
                    .unwrap_or(text.len())
            };
            self.cursor.caret -= step;
            self.refresh_x();
        }
        self.cursor.clear_desired_column();
        self.finish();
    }

    /// Place the caret at a (line, column), both clamped
    pub fn move_to_position(&mut self, position: Position) {
        self.cursor.line_index = position.line.min(self.lines.last_index());
        let line = self.current();
        self.cursor.caret = line.start + position.column.min(line.len());
        self.refresh_x();
        self.cursor.clear_desired_column();
        self.finish();
    }

    /// Place the caret under a pointer position.
    ///
    /// The line is the slot under `y`; the column is the first offset whose
    /// accumulated glyph width reaches `x`.
    pub fn move_to_point(&mut self, x: f32, y: f32) {
        let index = self.lines.line_at_y(y);
        let target_x = x - self.lines.layout().origin_x;
        let line = &self.lines[index];
        let start = line.start;
        let text = self.buffer.slice(line.start..line.end);

        let mut width = 0.0;
        let mut column = text.len();
        for (i, ch) in text.iter().enumerate() {
            if width >= target_x {
                column = i;
                break;
            }
            width += self.advance(*ch);
        }

        self.cursor.line_index = index;
        self.cursor.caret = start + column;
        self.cursor.x = width;
        self.cursor.clear_desired_column();
        self.finish();
    }

    pub fn move_cursor(&mut self, target: MoveTarget) {
        match target {
            MoveTarget::Left => self.move_left(),
            MoveTarget::Right => self.move_right(),
            MoveTarget::Up => self.move_up(),
            MoveTarget::Down => self.move_down(),
            MoveTarget::LineStart => self.move_line_start(),
            MoveTarget::LineEnd => self.move_line_end(),
            MoveTarget::WordLeft => self.move_word_left(),
            MoveTarget::WordRight => self.move_word_right(),
            MoveTarget::DocumentStart => self.move_document_start(),
            MoveTarget::DocumentEnd => self.move_document_end(),
        }
    }
}

// =============================================================================
// Host entry points and render surface
// =============================================================================

impl<M: GlyphMetrics> EditingEngine<M> {
    /// Apply one input intent. Returns true when a redraw is needed.
    pub fn handle(&mut self, msg: TextEditMsg) -> bool {
        #[cfg(debug_assertions)]
        let before =
            (!msg.is_noisy()).then(|| crate::tracing::CursorSnapshot::from_engine(self));

        if msg.is_editing() {
            tracing::trace!(?msg, line = self.cursor.line_index, "applying edit");
        }

        let changed = match msg {
            TextEditMsg::Move(target) => {
                self.move_cursor(target);
                true
            }
            TextEditMsg::InsertChar(ch) => self.insert_char(ch),
            TextEditMsg::InsertNewline => self.insert_line(),
            TextEditMsg::DeleteBackward => self.delete_char(),
            TextEditMsg::Indent => self.indent(),
            TextEditMsg::Outdent => self.outdent(),
            TextEditMsg::Paste(text) => match self.paste(&text) {
                Ok(applied) => applied,
                Err(e) => {
                    tracing::warn!("Paste skipped: {}", e);
                    false
                }
            },
            TextEditMsg::MouseDown { x, y } => {
                self.move_to_point(x, y);
                true
            }
            TextEditMsg::Tick => self.tick(),
        };

        #[cfg(debug_assertions)]
        if let Some(before) = before {
            let after = crate::tracing::CursorSnapshot::from_engine(self);
            if let Some(diff) = before.diff(&after) {
                tracing::debug!(target: "cursor", %diff, "state changed");
            }
        }

        changed
    }

    /// A typed character. CR, LF or CR followed by LF split the line once,
    /// tab indents, other control characters are ignored.
    pub fn on_character(&mut self, ch: char) -> bool {
        let after_cr = std::mem::replace(&mut self.after_typed_cr, ch == '\r');
        match ch {
            '\n' if after_cr => false,
            '\r' | '\n' => self.handle(TextEditMsg::InsertNewline),
            '\t' => self.handle(TextEditMsg::Indent),
            c if c.is_control() => false,
            c => self.handle(TextEditMsg::InsertChar(c)),
        }
    }

    /// A key press or auto-repeat
    pub fn on_key_repeat(&mut self, key: EditKey) -> bool {
        self.after_typed_cr = false;
        self.handle(key.into())
    }

    pub fn on_mouse_down(&mut self, x: f32, y: f32) -> bool {
        self.after_typed_cr = false;
        self.handle(TextEditMsg::MouseDown { x, y })
    }

    pub fn on_paste(&mut self, text: &str) -> Result<bool, EditError> {
        self.after_typed_cr = false;
        self.paste(text)
    }

    /// Advance the caret blink timer by one frame.
    /// Returns true when the caret visibility toggled.
    pub fn tick(&mut self) -> bool {
        self.blink.tick()
    }

    /// Drain queued line/column change notifications
    pub fn poll_cursor_events(&mut self) -> Vec<CursorEvent> {
        self.watch.drain()
    }

    /// Lines intersecting the vertical range `[top, top + height)`
    pub fn visible_lines(&self, top: f32, height: f32) -> impl Iterator<Item = RenderLine<'_>> {
        let bottom = top + height;
        let line_height = self.lines.layout().line_height;
        let first = self.lines.line_at_y(top);
        let last = self.lines.line_at_y(bottom);
        let current = self.cursor.line_index;
        let lines: &[Line] = if height > 0.0 {
            &self.lines.as_slice()[first..=last]
        } else {
            &[]
        };
        lines
            .iter()
            .filter(move |line| {
                line.display_origin < bottom && line.display_origin + line_height > top
            })
            .map(move |line| RenderLine {
                index: line.index,
                text: self.buffer.slice(line.start..line.end),
                tokens: line.tokens.as_slice(),
                origin_y: line.display_origin,
                is_current: line.index == current,
            })
    }

    /// Caret rectangle, or None when unfocused or in the hidden blink phase
    pub fn caret_rect(&self, focused: bool) -> Option<CaretRect> {
        if !focused || !self.blink.visible {
            return None;
        }
        Some(CaretRect {
            x: self.lines.layout().origin_x + self.cursor.x,
            y: self.current().display_origin,
            width: CARET_WIDTH,
            height: self.options.text_size,
        })
    }
}
