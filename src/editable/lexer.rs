//! Per-line lexer for syntax coloring.
//!
//! Each line owns a [`TokenStream`] that is rebuilt whenever that line's text
//! changes, so an edit costs O(line length) regardless of document size.
//! Token offsets are relative to the owning line's start, which keeps them
//! valid when lines above grow or shrink.

use std::collections::HashSet;

use serde::Serialize;

use super::metrics::GlyphMetrics;
use crate::util::text::is_line_break;

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Line separator (zero width)
    Newline,
    /// Run of spaces/tabs
    Whitespace,
    /// Word found in the keyword set
    Keyword,
    /// Any other word
    Identifier,
    /// Run starting with a digit
    Number,
    /// Single punctuation/operator character
    Symbol,
}

/// A lexed span within a line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Start offset relative to the line start
    pub start: usize,
    /// End offset (exclusive) relative to the line start
    pub end: usize,
    /// Cached sum of glyph advances over the span
    pub width: f32,
}

impl Token {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Tokens for one line, in order, covering the line without gaps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Total cached width of all tokens
    pub fn width(&self) -> f32 {
        self.tokens.iter().map(|t| t.width).sum()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Default keyword set (Go keywords and builtin types)
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "type", "struct", "interface", "func", "go", "return", "bool", "uint", "uint8", "uint16",
    "uint32", "uint64", "int", "int8", "int16", "int32", "int64", "float64", "float32",
];

/// Classifies characters into tokens against a caller-supplied keyword set
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    keywords: HashSet<String>,
    /// Reused scratch space for keyword lookups
    word: String,
}

impl Lexer {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            word: String::new(),
        }
    }

    pub fn set_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Rebuild `stream` from one line's characters.
    ///
    /// `has_separator` appends a zero-width Newline token covering the line's
    /// trailing CR+LF.
    pub fn relex<M: GlyphMetrics + ?Sized>(
        &mut self,
        stream: &mut TokenStream,
        text: &[char],
        has_separator: bool,
        metrics: &M,
        size: f32,
    ) {
        stream.clear();
        let len = text.len();
        let mut i = 0;

        while i < len {
            let start = i;
            let ch = text[i];
            let kind = if is_line_break(ch) {
                i += if ch == '\r' && text.get(i + 1) == Some(&'\n') { 2 } else { 1 };
                TokenKind::Newline
            } else if is_space(ch) {
                while i < len && is_space(text[i]) {
                    i += 1;
                }
                TokenKind::Whitespace
            } else if ch.is_ascii_digit() {
                while i < len && is_number_continue(text[i]) {
                    i += 1;
                }
                TokenKind::Number
            } else if is_word_start(ch) {
                while i < len && is_word_continue(text[i]) {
                    i += 1;
                }
                self.word.clear();
                self.word.extend(&text[start..i]);
                if self.keywords.contains(self.word.as_str()) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                }
            } else {
                i += 1;
                TokenKind::Symbol
            };

            let width = if kind == TokenKind::Newline {
                0.0
            } else {
                metrics.run_width(&text[start..i], size)
            };
            stream.push(Token {
                kind,
                start,
                end: i,
                width,
            });
        }

        if has_separator {
            stream.push(Token {
                kind: TokenKind::Newline,
                start: len,
                end: len + super::line::SEPARATOR_LEN,
                width: 0.0,
            });
        }
    }
}

fn is_space(ch: char) -> bool {
    ch.is_whitespace() && !is_line_break(ch)
}

fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_word_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_number_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}
