//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use textbox::config::EditorConfig;
use textbox::editable::{EditingEngine, MonospaceMetrics, Position, TokenKind, SEPARATOR_LEN};

/// Glyph advance used by every test engine
pub const CHAR_WIDTH: f32 = 10.0;

/// Default config with no margin and a 10px text size
pub fn test_config() -> EditorConfig {
    EditorConfig {
        margin: 0.0,
        text_size: 10.0,
        ..EditorConfig::default()
    }
}

/// Create a test engine holding `text`, caret at the end of the document
pub fn test_engine(text: &str) -> EditingEngine<MonospaceMetrics> {
    test_engine_with(test_config(), text)
}

pub fn test_engine_with(config: EditorConfig, text: &str) -> EditingEngine<MonospaceMetrics> {
    EditingEngine::with_text(&config, MonospaceMetrics::new(CHAR_WIDTH), text)
        .expect("test document fits")
}

/// Create a test engine with the caret at (line, column)
pub fn test_engine_at(text: &str, line: usize, column: usize) -> EditingEngine<MonospaceMetrics> {
    let mut engine = test_engine(text);
    engine.move_to_position(Position::new(line, column));
    engine.poll_cursor_events();
    engine
}

/// `(start, end)` of every line
pub fn spans(engine: &EditingEngine<MonospaceMetrics>) -> Vec<(usize, usize)> {
    engine.lines().iter().map(|l| (l.start, l.end)).collect()
}

/// Text of every line
pub fn line_texts(engine: &EditingEngine<MonospaceMetrics>) -> Vec<String> {
    (0..engine.line_count())
        .map(|i| engine.line_text(i).unwrap_or_default())
        .collect()
}

/// Check the structural guarantees every public operation must leave behind
pub fn assert_consistent(engine: &EditingEngine<MonospaceMetrics>) {
    let lines = engine.lines();
    assert!(!lines.is_empty());
    assert_eq!(lines[0].start, 0);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line.index, i);
        if let Some(next) = lines.get(i + 1) {
            assert_eq!(line.end + SEPARATOR_LEN, next.start, "gap after line {}", i);
        }

        let has_separator = i + 1 < lines.len();
        let mut expected = 0;
        for token in &line.tokens {
            assert_eq!(token.start, expected, "token gap on line {}", i);
            expected = token.end;
        }
        let covered = if has_separator {
            line.len() + SEPARATOR_LEN
        } else {
            line.len()
        };
        assert_eq!(expected, covered, "tokens do not cover line {}", i);
        if has_separator {
            assert_eq!(
                line.tokens.as_slice().last().map(|t| t.kind),
                Some(TokenKind::Newline)
            );
        }
    }
    assert_eq!(lines[lines.len() - 1].end, engine.len());

    let caret = engine.caret();
    let current = &lines[engine.current_line()];
    assert!(current.start <= caret && caret <= current.end);
}
