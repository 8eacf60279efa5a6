//! Glyph metrics provider used for caret offsets and token widths.
//!
//! The engine never rasterizes text; it only asks how far each glyph advances.

use std::rc::Rc;
use std::sync::Arc;

use fontdue::{Font, FontSettings};

/// Query interface over a font's horizontal metrics
pub trait GlyphMetrics {
    /// Horizontal advance of a single character at the given size
    fn advance(&self, ch: char, size: f32) -> f32;

    /// Bounding box (width, height) of a string at the given size
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let width = text.chars().map(|ch| self.advance(ch, size)).sum();
        (width, size)
    }

    /// Sum of advances over a run of characters
    fn run_width(&self, text: &[char], size: f32) -> f32 {
        text.iter().map(|ch| self.advance(*ch, size)).sum()
    }
}

impl<T: GlyphMetrics + ?Sized> GlyphMetrics for &T {
    fn advance(&self, ch: char, size: f32) -> f32 {
        (**self).advance(ch, size)
    }

    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        (**self).measure(text, size)
    }
}

impl<T: GlyphMetrics + ?Sized> GlyphMetrics for Rc<T> {
    fn advance(&self, ch: char, size: f32) -> f32 {
        (**self).advance(ch, size)
    }

    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        (**self).measure(text, size)
    }
}

impl<T: GlyphMetrics + ?Sized> GlyphMetrics for Arc<T> {
    fn advance(&self, ch: char, size: f32) -> f32 {
        (**self).advance(ch, size)
    }

    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        (**self).measure(text, size)
    }
}

/// Fixed-width metrics: every printable glyph advances by the same amount.
///
/// Line breaks have zero advance. Useful headless and in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f32,
}

impl MonospaceMetrics {
    pub const fn new(char_width: f32) -> Self {
        Self { char_width }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn advance(&self, ch: char, _size: f32) -> f32 {
        if ch == '\r' || ch == '\n' {
            0.0
        } else {
            self.char_width
        }
    }
}

/// Metrics backed by a fontdue font
#[derive(Clone)]
pub struct FontMetrics {
    font: Arc<Font>,
}

impl FontMetrics {
    /// Parse a TrueType/OpenType font from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| format!("Failed to parse font: {}", e))?;
        Ok(Self {
            font: Arc::new(font),
        })
    }

    pub fn font(&self) -> &Font {
        &self.font
    }
}

impl std::fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMetrics")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl GlyphMetrics for FontMetrics {
    fn advance(&self, ch: char, size: f32) -> f32 {
        if ch == '\r' || ch == '\n' {
            return 0.0;
        }
        self.font.metrics(ch, size).advance_width
    }

    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let width = text.chars().map(|ch| self.advance(ch, size)).sum();
        let height = self
            .font
            .horizontal_line_metrics(size)
            .map(|m| m.new_line_size)
            .unwrap_or(size);
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_advance() {
        let m = MonospaceMetrics::new(8.0);
        assert_eq!(m.advance('a', 12.0), 8.0);
        assert_eq!(m.advance('\n', 12.0), 0.0);
        assert_eq!(m.measure("abc", 12.0), (24.0, 12.0));
    }

    #[test]
    fn test_run_width_through_reference() {
        let m = MonospaceMetrics::new(5.0);
        let r = &m;
        assert_eq!(r.run_width(&['a', 'b'], 12.0), 10.0);
    }

    #[test]
    fn test_font_metrics_rejects_garbage() {
        assert!(FontMetrics::from_bytes(b"not a font").is_err());
    }
}
