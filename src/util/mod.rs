//! Utility modules

pub mod text;

pub use text::{is_blank, is_line_break, split_line_breaks, DEFAULT_WORD_TERMINALS};
