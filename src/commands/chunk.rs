//! Chunk command handler

use anyhow::Result;
use humansize::{format_size, BINARY};

use ctxsmith::{ChunkedContent, ContentChunk, ContentChunker, ContentType};

use super::{read_input, resolve_options, truncate_string};
use crate::cli::{InputArgs, SizeArgs};

const PREVIEW_CHARS: usize = 48;

/// Chunk a document and print a table or the full JSON result.
#[cfg(not(tarpaulin_include))]
pub fn handle(input: &InputArgs, sizes: &SizeArgs, json: bool) -> Result<()> {
    let text = read_input(&input.file)?;
    let options = resolve_options(sizes, None)?;
    let chunked = ContentChunker::new(options).chunk_content(&text, input.content_type);

    if json {
        println!("{}", serde_json::to_string_pretty(&chunked)?);
    } else {
        print!("{}", render_table(&chunked, input.content_type));
    }
    Ok(())
}

/// Human-readable chunk listing.
pub fn render_table(chunked: &ChunkedContent, content_type: ContentType) -> String {
    let mut out = format!(
        "{} ({}), ~{} tokens, {} chunk{}\n",
        content_type.label(),
        format_size(chunked.total_length as u64, BINARY),
        chunked.total_tokens,
        chunked.len(),
        if chunked.len() == 1 { "" } else { "s" }
    );
    if chunked.is_empty() {
        return out;
    }
    if !chunked.key_topics.is_empty() {
        out.push_str(&format!("Key topics: {}\n", chunked.key_topics.join(", ")));
    }
    out.push('\n');
    for chunk in &chunked.chunks {
        out.push_str(&format!(
            "{:<18} {:>6} tok  {:.2}  {:<13}  {}\n",
            chunk.id,
            chunk.token_count,
            chunk.relevance_score,
            position(chunk),
            truncate_string(&chunk.body().split_whitespace().collect::<Vec<_>>().join(" "), PREVIEW_CHARS)
        ));
    }
    out
}

fn position(chunk: &ContentChunk) -> String {
    if let Some(range) = &chunk.timestamp_range {
        return range.label();
    }
    if let Some(page) = chunk.metadata.page_number {
        return format!("page {}", page);
    }
    format!("@{}", chunk.start_offset)
}
