//! Command handlers for the ctxsmith CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod batch;
pub mod chapters;
pub mod chunk;
pub mod completions;
pub mod config;
pub mod context;
pub mod prompt;
pub mod timestamps;
pub mod tokens;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};

use ctxsmith::config::ChunkingOverrides;
use ctxsmith::{ChunkingOptions, Config};

use crate::cli::SizeArgs;

/// Truncate a string to a maximum length, adding ellipsis if needed.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Read a whole input file, or stdin for `-`.
pub fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(file).with_context(|| format!("Failed to read input file: {}", file))
}

/// Engine options from the config file with command line sizes applied.
pub fn resolve_options(sizes: &SizeArgs, include_overview: Option<bool>) -> Result<ChunkingOptions> {
    let config = Config::load()?;
    Ok(config.chunking_options_with(&ChunkingOverrides {
        max_chunk_tokens: sizes.max_chunk_tokens,
        overlap_tokens: sizes.overlap_tokens,
        include_overview,
    }))
}
