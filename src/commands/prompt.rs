//! Prompt command handler

use anyhow::Result;

use ctxsmith::{build_chapter_prompt, ChapterHints, ContentChunker};

use super::{read_input, resolve_options};
use crate::cli::{InputArgs, SizeArgs};

/// Print the system/user chapter prompt pair for a document.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    input: &InputArgs,
    budget: usize,
    pages: Option<u32>,
    duration: Option<f64>,
) -> Result<()> {
    let text = read_input(&input.file)?;
    let options = resolve_options(&SizeArgs::default(), None)?;
    let chunked = ContentChunker::new(options).chunk_content(&text, input.content_type);
    let hints = ChapterHints {
        page_count: pages,
        duration_seconds: duration,
    };
    let prompt = build_chapter_prompt(&chunked, input.content_type, &hints, budget);
    println!("=== system ===\n{}\n\n=== user ===\n{}", prompt.system, prompt.user);
    Ok(())
}
