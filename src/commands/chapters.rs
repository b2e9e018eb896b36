//! Chapters command handler

use anyhow::{Context, Result};

use ctxsmith::{parse_chapters, ChapterHints};

use super::read_input;

/// Parse and validate a chapter response, printing chapters as JSON.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &str, pages: Option<u32>, duration: Option<f64>) -> Result<()> {
    let response = read_input(file)?;
    let hints = ChapterHints {
        page_count: pages,
        duration_seconds: duration,
    };
    let chapters = parse_chapters(&response, &hints)
        .with_context(|| format!("No chapters in response: {}", file))?;
    println!("{}", serde_json::to_string_pretty(&chapters)?);
    Ok(())
}
