//! Editing engine for the textbox widget.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`TextBuffer`]: capacity-bounded character storage with offset edits
//! - [`LineTable`]: ordered line spans over the buffer, split/merged in place
//! - [`Lexer`] / [`TokenStream`]: per-line token streams, rebuilt only for touched lines
//! - [`Cursor`]: caret offset, owning line, indent level, cached X and sticky column
//! - [`GlyphMetrics`]: per-glyph advances supplied by the host's font
//! - [`EditingEngine`]: ties the above together behind edit/navigation operations
//! - [`TextEditMsg`]: message type for routing host input through [`EditingEngine::handle`]
//!
//! # Example
//!
//! ```ignore
//! use textbox::config::EditorConfig;
//! use textbox::editable::{EditingEngine, MonospaceMetrics};
//!
//! let mut engine = EditingEngine::new(&EditorConfig::default(), MonospaceMetrics::default());
//! for ch in "func".chars() {
//!     engine.insert_char(ch);
//! }
//! engine.insert_line();
//!
//! assert_eq!(engine.text(), "func\r\n");
//! assert_eq!(engine.current_line(), 1);
//! ```

mod buffer;
mod cursor;
mod engine;
mod events;
mod lexer;
mod line;
mod messages;
mod metrics;

// Re-export main types
pub use buffer::TextBuffer;
pub use cursor::{Cursor, Position};
pub use engine::{
    CaretRect, EditingEngine, EngineOptions, LineEnding, RenderLine, BLINK_TICKS, CARET_WIDTH,
};
pub use events::{CursorEvent, CursorWatch};
pub use lexer::{Lexer, Token, TokenKind, TokenStream, DEFAULT_KEYWORDS};
pub use line::{Layout, Line, LineTable, LINE_SEPARATOR, SEPARATOR_LEN};
pub use messages::{EditKey, MoveTarget, TextEditMsg};
pub use metrics::{FontMetrics, GlyphMetrics, MonospaceMetrics};
