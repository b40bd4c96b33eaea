use std::path::Path;

use anyhow::{anyhow, Context, Result};

use scrollkeep_core::scroll::{CursorPosition, ScrollOutcome};
use scrollkeep_core::{AppConfig, MemoryDocument, MemoryHost, MemoryView, ScrollCommand, TextView};

/// Initial viewport for a replay (0-based)
#[derive(Debug, Clone, Copy)]
pub struct ReplayOptions {
    pub height: usize,
    pub top: usize,
    pub cursor: CursorPosition,
}

pub async fn run(config: &AppConfig, file: &Path, options: ReplayOptions, ids: &[String]) -> Result<()> {
    // Reject unknown ids before touching anything
    let commands = ids
        .iter()
        .map(|id| id.parse::<ScrollCommand>())
        .collect::<scrollkeep_core::Result<Vec<_>>>()?;

    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut host = MemoryHost::new(build_view(&text, config, options));

    println!("{}", describe_state(&host, "start"));
    for command in commands {
        let outcome = command.execute(&mut host, &config.scroll).await;
        let mut line = describe_state(&host, command.id());
        if let Some(ScrollOutcome::Skipped(reason)) = outcome {
            line.push_str(&format!("  (skipped: {reason:?})"));
        }
        println!("{line}");
    }

    Ok(())
}

fn build_view(text: &str, config: &AppConfig, options: ReplayOptions) -> MemoryView {
    MemoryView::new(MemoryDocument::from_text(text), options.height)
        .with_config(&config.scroll)
        .with_top(options.top)
        .with_cursor(options.cursor)
}

/// One line of replay output: step label, visible lines and cursor, 1-based
fn describe_state(host: &MemoryHost, label: &str) -> String {
    match host.view() {
        Some(view) => {
            let range = view.visible_range();
            format!(
                "{:<20} lines {:>5}-{:<5} cursor {}",
                label,
                range.start_line + 1,
                range.end_line + 1,
                view.cursor()
            )
        }
        None => format!("{label:<20} (no view)"),
    }
}

/// Parse a 1-based `LINE:COL` (or bare `LINE`) into a cursor position
pub fn parse_cursor(s: &str) -> Result<CursorPosition> {
    let (line, column) = match s.split_once(':') {
        Some((line, column)) => (line, column),
        None => (s, "1"),
    };
    let line: usize = line
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid line number '{line}'"))?;
    let column: usize = column
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid column '{column}'"))?;
    if line == 0 || column == 0 {
        return Err(anyhow!("line and column are 1-based"));
    }
    Ok(CursorPosition::new(line - 1, column - 1))
}
