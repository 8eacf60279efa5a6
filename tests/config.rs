//! Config tests - YAML parsing and its effect on a fresh engine

mod common;

use common::{test_engine_with, CHAR_WIDTH};
use textbox::editable::{EditingEngine, EngineOptions, MonospaceMetrics, DEFAULT_KEYWORDS};
use textbox::EditorConfig;

#[test]
fn test_defaults() {
    let config = EditorConfig::default();
    assert_eq!(config.capacity, 4_194_304);
    assert_eq!(config.tab_size, 2);
    assert!(config.auto_indent);
    assert!(config.multiline);
    assert_eq!(config.keywords.len(), DEFAULT_KEYWORDS.len());
    assert!(config.word_terminals.contains(&'.'));
}

#[test]
fn test_partial_yaml_keeps_defaults() {
    let config = EditorConfig::from_yaml("tab_size: 4\nmultiline: false\n").unwrap();
    assert_eq!(config.tab_size, 4);
    assert!(!config.multiline);
    assert_eq!(config.capacity, EditorConfig::default().capacity);
    assert_eq!(config.keywords, EditorConfig::default().keywords);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    assert!(EditorConfig::from_yaml("tab_size: [").is_err());
    assert!(EditorConfig::from_yaml("tab_size: lots").is_err());
}

#[test]
fn test_yaml_round_trip() {
    let config = EditorConfig {
        tab_size: 8,
        indent_with_tabs: true,
        keywords: vec!["select".into(), "from".into()],
        ..EditorConfig::default()
    };
    let yaml = config.to_yaml().unwrap();
    assert_eq!(EditorConfig::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_engine_options_from_config() {
    let config = EditorConfig {
        tab_size: 4,
        text_size: 16.0,
        line_padding: 2.0,
        ..EditorConfig::default()
    };
    let options = EngineOptions::from(&config);
    assert_eq!(options.indent_unit, vec![' '; 4]);
    assert_eq!(options.line_height, 18.0);
    assert_eq!(options.capacity, config.capacity);
}

#[test]
fn test_yaml_config_drives_engine() {
    let config = EditorConfig::from_yaml(
        "tab_size: 4\nmargin: 0.0\ntext_size: 10.0\nword_terminals: [' ', '-']\n",
    )
    .unwrap();
    let mut engine = test_engine_with(config, "a-b.c");
    engine.move_line_start();
    engine.move_word_right();
    assert_eq!(engine.caret(), 1);
    engine.move_word_right();
    engine.move_word_right();
    assert_eq!(engine.caret(), 5);

    engine.move_line_start();
    engine.indent();
    assert_eq!(engine.text(), "    a-b.c");
}

#[test]
fn test_zero_tab_size_still_indents() {
    let config = EditorConfig {
        tab_size: 0,
        ..EditorConfig::default()
    };
    let mut engine = EditingEngine::new(&config, MonospaceMetrics::new(CHAR_WIDTH));
    engine.indent();
    assert_eq!(engine.text(), " ");
    assert_eq!(engine.cursor().indent_level, 1);
}
