//! Character storage for the editing engine.
//!
//! A contiguous `Vec<char>` with shift-based insert/delete. Edits happen near
//! the caret, so the O(distance to end) shift is cheap in practice. The
//! configured capacity is checked on every growing path.

use std::ops::Range;

use crate::error::EditError;

/// Initial allocation hint; storage grows on demand up to the capacity
const INITIAL_STORAGE: usize = 256;

/// Ordered character store. All positions are absolute char offsets in `[0, len]`.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    chars: Vec<char>,
    capacity: usize,
}

impl TextBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity.min(INITIAL_STORAGE)),
            capacity,
        }
    }

    /// Maximum number of characters the buffer accepts
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// How many more characters fit before the capacity is reached
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.chars.len())
    }

    /// Fail with `CapacityExceeded` unless `additional` characters still fit
    pub fn ensure_room(&self, additional: usize) -> Result<(), EditError> {
        if additional > self.remaining() {
            return Err(EditError::CapacityExceeded {
                required: self.chars.len() + additional,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Insert one character at `offset`, shifting `[offset, len)` right
    pub fn insert_at(&mut self, offset: usize, ch: char) -> Result<(), EditError> {
        self.ensure_room(1)?;
        debug_assert!(offset <= self.len(), "insert offset {} past end", offset);
        let offset = offset.min(self.len());
        self.chars.insert(offset, ch);
        Ok(())
    }

    /// Bulk insert a run of characters at `offset`.
    ///
    /// This is a raw copy: line breaks inside `chars` are not interpreted here,
    /// the engine splits pastes at breaks before calling it.
    pub fn insert_slice(&mut self, offset: usize, chars: &[char]) -> Result<(), EditError> {
        self.ensure_room(chars.len())?;
        debug_assert!(offset <= self.len(), "insert offset {} past end", offset);
        let offset = offset.min(self.len());
        self.chars.splice(offset..offset, chars.iter().copied());
        Ok(())
    }

    /// Remove the character immediately before `offset` (backspace semantics).
    ///
    /// No-op at offset 0.
    pub fn delete_at(&mut self, offset: usize) -> Option<char> {
        if offset == 0 || offset > self.len() {
            return None;
        }
        Some(self.chars.remove(offset - 1))
    }

    /// Remove a range of characters, clamped to the buffer
    pub fn remove_range(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len());
        let end = range.end.min(self.len());
        if start < end {
            self.chars.drain(start..end);
        }
    }

    /// Read-only view of a range, clamped to the buffer
    pub fn slice(&self, range: Range<usize>) -> &[char] {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        &self.chars[start..end]
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// All live characters
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Full content as a String
    pub fn content(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> TextBuffer {
        let mut buf = TextBuffer::new(64);
        let chars: Vec<char> = text.chars().collect();
        buf.insert_slice(0, &chars).unwrap();
        buf
    }

    #[test]
    fn test_insert_at_shifts_tail() {
        let mut buf = buffer("hllo");
        buf.insert_at(1, 'e').unwrap();
        assert_eq!(buf.content(), "hello");
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn test_insert_at_end() {
        let mut buf = buffer("ab");
        buf.insert_at(2, 'c').unwrap();
        assert_eq!(buf.content(), "abc");
    }

    #[test]
    fn test_insert_rejected_at_capacity() {
        let mut buf = TextBuffer::new(2);
        buf.insert_at(0, 'a').unwrap();
        buf.insert_at(1, 'b').unwrap();
        let err = buf.insert_at(2, 'c').unwrap_err();
        assert_eq!(
            err,
            EditError::CapacityExceeded {
                required: 3,
                capacity: 2
            }
        );
        assert_eq!(buf.content(), "ab");
    }

    #[test]
    fn test_insert_slice_checks_whole_run() {
        let mut buf = TextBuffer::new(4);
        buf.insert_slice(0, &['a', 'b', 'c']).unwrap();
        assert!(buf.insert_slice(1, &['x', 'y']).is_err());
        assert_eq!(buf.content(), "abc");
    }

    #[test]
    fn test_delete_at_removes_previous_char() {
        let mut buf = buffer("hello");
        assert_eq!(buf.delete_at(5), Some('o'));
        assert_eq!(buf.content(), "hell");
        assert_eq!(buf.delete_at(1), Some('h'));
        assert_eq!(buf.content(), "ell");
    }

    #[test]
    fn test_delete_at_zero_is_noop() {
        let mut buf = buffer("abc");
        assert_eq!(buf.delete_at(0), None);
        assert_eq!(buf.content(), "abc");
    }

    #[test]
    fn test_slice_and_remove_range() {
        let mut buf = buffer("hello world");
        assert_eq!(buf.slice(6..11), &['w', 'o', 'r', 'l', 'd']);
        assert_eq!(buf.slice(9..50).len(), 2);
        buf.remove_range(5..11);
        assert_eq!(buf.content(), "hello");
    }

    #[test]
    fn test_utf8_is_counted_in_chars() {
        let buf = buffer("héllo");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.char_at(1), Some('é'));
    }
}
