//! Benchmarks for per-line lexing
//!
//! Run with: cargo bench --bench lexing

use divan::Bencher;
use textbox::editable::{Lexer, MonospaceMetrics, TokenStream, DEFAULT_KEYWORDS};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const GO_LINE: &str = "func (s *Store) Insert(key string, value int64) (bool, error) { return s.put(key, 0x2A) }";

#[divan::bench(args = [10, 100, 1000])]
fn relex_line(bencher: Bencher, repeat: usize) {
    let chars: Vec<char> = GO_LINE.repeat(repeat).chars().collect();
    let mut lexer = Lexer::new(DEFAULT_KEYWORDS.iter().copied());
    let mut stream = TokenStream::new();
    let metrics = MonospaceMetrics::default();
    bencher.bench_local(|| {
        lexer.relex(&mut stream, divan::black_box(&chars), true, &metrics, 12.0);
        stream.len()
    });
}

#[divan::bench]
fn relex_whitespace_heavy(bencher: Bencher) {
    let chars: Vec<char> = format!("{}x", " ".repeat(4096)).chars().collect();
    let mut lexer = Lexer::new(DEFAULT_KEYWORDS.iter().copied());
    let mut stream = TokenStream::new();
    let metrics = MonospaceMetrics::default();
    bencher.bench_local(|| {
        lexer.relex(&mut stream, divan::black_box(&chars), false, &metrics, 12.0);
    });
}
