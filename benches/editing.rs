//! Benchmarks for edit operations on large documents
//!
//! Run with: cargo bench --bench editing

use divan::Bencher;
use textbox::editable::{EditingEngine, MonospaceMetrics, Position};
use textbox::EditorConfig;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn make_engine(lines: usize) -> EditingEngine<MonospaceMetrics> {
    let text = "func quick(brown fox) int { return 42 }\n".repeat(lines);
    EditingEngine::with_text(&EditorConfig::default(), MonospaceMetrics::default(), &text)
        .expect("benchmark document fits")
}

fn middle(engine: &mut EditingEngine<MonospaceMetrics>) {
    let line = engine.line_count() / 2;
    engine.move_to_position(Position::new(line, 10));
}

// ============================================================================
// Load
// ============================================================================

#[divan::bench(args = [1_000, 10_000, 50_000])]
fn load_document(bencher: Bencher, lines: usize) {
    let text = "func quick(brown fox) int { return 42 }\n".repeat(lines);
    let config = EditorConfig::default();
    bencher.bench_local(|| {
        EditingEngine::with_text(&config, MonospaceMetrics::default(), divan::black_box(&text))
    });
}

// ============================================================================
// Per-keystroke edits in the middle of the document
// ============================================================================

#[divan::bench(args = [1_000, 10_000, 50_000])]
fn insert_char_middle(bencher: Bencher, lines: usize) {
    bencher
        .with_inputs(|| {
            let mut engine = make_engine(lines);
            middle(&mut engine);
            engine
        })
        .bench_local_refs(|engine| engine.insert_char(divan::black_box('x')));
}

#[divan::bench(args = [1_000, 10_000, 50_000])]
fn split_line_middle(bencher: Bencher, lines: usize) {
    bencher
        .with_inputs(|| {
            let mut engine = make_engine(lines);
            middle(&mut engine);
            engine
        })
        .bench_local_refs(|engine| engine.insert_line());
}

#[divan::bench(args = [1_000, 10_000, 50_000])]
fn merge_line_middle(bencher: Bencher, lines: usize) {
    bencher
        .with_inputs(|| {
            let mut engine = make_engine(lines);
            let line = engine.line_count() / 2;
            engine.move_to_position(Position::new(line, 0));
            engine
        })
        .bench_local_refs(|engine| engine.delete_char());
}

#[divan::bench(args = [1_000, 10_000])]
fn paste_100_lines_middle(bencher: Bencher, lines: usize) {
    let clip = "let x = 1\n".repeat(100);
    bencher
        .with_inputs(|| {
            let mut engine = make_engine(lines);
            middle(&mut engine);
            engine
        })
        .bench_local_refs(|engine| engine.paste(divan::black_box(&clip)));
}

// ============================================================================
// Navigation
// ============================================================================

#[divan::bench(args = [1_000, 10_000])]
fn move_down_100(bencher: Bencher, lines: usize) {
    bencher
        .with_inputs(|| make_engine(lines))
        .bench_local_refs(|engine| {
            engine.move_document_start();
            for _ in 0..100 {
                engine.move_down();
            }
        });
}

#[divan::bench]
fn word_right_across_line(bencher: Bencher) {
    bencher
        .with_inputs(|| make_engine(100))
        .bench_local_refs(|engine| {
            engine.move_document_start();
            for _ in 0..20 {
                engine.move_word_right();
            }
        });
}

#[divan::bench(args = [1_000, 10_000])]
fn visible_lines_middle(bencher: Bencher, lines: usize) {
    let engine = make_engine(lines);
    let top = engine.layout().line_origin(lines / 2);
    bencher.bench_local(|| engine.visible_lines(divan::black_box(top), 600.0).count());
}
