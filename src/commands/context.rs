//! Context command handler

use anyhow::Result;

use ctxsmith::{select_chunks_for_context, ContentChunker};

use super::{read_input, resolve_options};
use crate::cli::{InputArgs, SizeArgs};

/// Chunk a document and print a context of at most `budget` tokens.
#[cfg(not(tarpaulin_include))]
pub fn handle(input: &InputArgs, sizes: &SizeArgs, budget: usize, no_overview: bool) -> Result<()> {
    let text = read_input(&input.file)?;
    let options = resolve_options(sizes, no_overview.then_some(false))?;
    let chunked = ContentChunker::new(options.clone()).chunk_content(&text, input.content_type);
    let context = select_chunks_for_context(&chunked, budget, &options);
    println!("{}", context);
    Ok(())
}
