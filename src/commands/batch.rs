//! Batch command handler

use anyhow::Result;
use humansize::{format_size, BINARY};

use ctxsmith::{chunk_many, ContentType};

use super::{read_input, resolve_options};
use crate::cli::SizeArgs;

/// Chunk several files in parallel and print one summary line per file.
#[cfg(not(tarpaulin_include))]
pub fn handle(files: &[String], content_type: ContentType, sizes: &SizeArgs) -> Result<()> {
    let texts = files
        .iter()
        .map(|file| read_input(file))
        .collect::<Result<Vec<String>>>()?;
    let documents: Vec<(&str, ContentType)> =
        texts.iter().map(|text| (text.as_str(), content_type)).collect();

    let options = resolve_options(sizes, None)?;
    let results = chunk_many(&documents, &options);

    for (file, chunked) in files.iter().zip(&results) {
        println!(
            "{}: {}, ~{} tokens, {} chunks, window {}",
            file,
            format_size(chunked.total_length as u64, BINARY),
            chunked.total_tokens,
            chunked.len(),
            chunked.optimal_context_window
        );
    }
    Ok(())
}
