use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use textbox::editable::{EditingEngine, FontMetrics, GlyphMetrics, MonospaceMetrics, Token};
use textbox::file_source::FsFileSource;
use textbox::{EditorConfig, TabManager};

mod cli;

use cli::{CliArgs, OutputFormat, StartupConfig};

/// One line of the JSON dump
#[derive(Serialize)]
struct DumpLine<'a> {
    index: usize,
    start: usize,
    end: usize,
    text: String,
    tokens: &'a [Token],
}

#[derive(Serialize)]
struct Dump<'a> {
    name: &'a str,
    line: usize,
    column: usize,
    lines: Vec<DumpLine<'a>>,
}

fn main() -> Result<()> {
    textbox::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;
    let config = EditorConfig::load();

    match &startup.font {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read font {}", path.display()))?;
            let metrics = FontMetrics::from_bytes(&bytes).map_err(anyhow::Error::msg)?;
            run(config, metrics, &startup)
        }
        None => run(config, MonospaceMetrics::default(), &startup),
    }
}

fn run<M: GlyphMetrics + Clone>(
    config: EditorConfig,
    metrics: M,
    startup: &StartupConfig,
) -> Result<()> {
    let mut tabs = TabManager::new(config, metrics);
    for path in &startup.files {
        tabs.open_file(&FsFileSource, path)
            .map_err(|e| anyhow::anyhow!(e.user_message(&path.display().to_string())))?;
    }
    if tabs.is_empty() {
        tabs.open_document("untitled", "")?;
    }

    let Some(tab) = tabs.active_mut() else {
        anyhow::bail!("No document open");
    };
    if let Some(position) = startup.initial_position {
        tab.engine.move_to_position(position);
    }
    if let Some(text) = &startup.typed {
        for ch in text.chars() {
            tab.engine.on_character(ch);
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match startup.output {
        OutputFormat::Text => print_text(&mut out, &tab.name, &tab.engine)?,
        OutputFormat::Json => print_json(&mut out, &tab.name, &tab.engine)?,
    }

    if startup.write {
        tabs.save_active(&FsFileSource)?;
    }
    Ok(())
}

fn print_text<M: GlyphMetrics>(
    out: &mut impl Write,
    name: &str,
    engine: &EditingEngine<M>,
) -> Result<()> {
    let (line, column) = engine.position().display();
    writeln!(out, "{} Ln {}, Col {}", name, line, column)?;
    for (index, line) in engine.lines().iter().enumerate() {
        let text = engine.line_text(index).unwrap_or_default();
        let kinds: Vec<String> = line
            .tokens
            .iter()
            .map(|t| format!("{:?}[{}..{})", t.kind, t.start, t.end))
            .collect();
        writeln!(out, "{:>4} | {}", index + 1, text)?;
        if !kinds.is_empty() {
            writeln!(out, "     | {}", kinds.join(" "))?;
        }
    }
    Ok(())
}

fn print_json<M: GlyphMetrics>(
    out: &mut impl Write,
    name: &str,
    engine: &EditingEngine<M>,
) -> Result<()> {
    let dump = Dump {
        name,
        line: engine.current_line(),
        column: engine.current_column(),
        lines: engine
            .lines()
            .iter()
            .map(|line| DumpLine {
                index: line.index,
                start: line.start,
                end: line.end,
                text: engine.line_text(line.index).unwrap_or_default(),
                tokens: line.tokens.as_slice(),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &dump)?;
    writeln!(out)?;
    Ok(())
}
