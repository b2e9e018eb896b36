//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::chunking::config::{
    ContextOptions, TimestampOptions, CHARS_PER_TOKEN, DEFAULT_MAX_CHUNK_TOKENS,
    DEFAULT_OVERLAP_TOKENS,
};
use crate::chunking::relevance::RelevanceWeights;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingSection,
    #[serde(default)]
    pub timestamps: TimestampOptions,
    #[serde(default)]
    pub relevance: RelevanceWeights,
    #[serde(default)]
    pub context: ContextOptions,
}

/// Chunk sizing configuration.
///
/// Sizes are optional so a file only overrides what it names. Token-based
/// sizes win over the legacy character-based ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkingSection {
    /// Target chunk size in tokens
    #[serde(default)]
    pub max_chunk_tokens: Option<usize>,
    /// Overlap between consecutive chunks in tokens
    #[serde(default)]
    pub overlap_tokens: Option<usize>,
    /// Legacy chunk size in characters (4 per token)
    #[serde(default)]
    pub max_chunk_size: Option<usize>,
    /// Legacy overlap in characters (4 per token)
    #[serde(default)]
    pub overlap_size: Option<usize>,
    #[serde(default = "default_preserve_structure")]
    pub preserve_structure: bool,
    #[serde(default = "default_prioritize_relevance")]
    pub prioritize_relevance: bool,
}

pub fn default_preserve_structure() -> bool {
    true
}

pub fn default_prioritize_relevance() -> bool {
    true
}

impl Default for ChunkingSection {
    fn default() -> Self {
        Self {
            max_chunk_tokens: None,
            overlap_tokens: None,
            max_chunk_size: None,
            overlap_size: None,
            preserve_structure: default_preserve_structure(),
            prioritize_relevance: default_prioritize_relevance(),
        }
    }
}

impl ChunkingSection {
    /// Chunk size in tokens: token option, then legacy chars / 4, then default.
    pub fn resolved_max_chunk_tokens(&self) -> usize {
        self.max_chunk_tokens
            .or(self.max_chunk_size.map(|chars| chars / CHARS_PER_TOKEN))
            .unwrap_or(DEFAULT_MAX_CHUNK_TOKENS)
    }

    /// Overlap in tokens: token option, then legacy chars / 4, then default.
    pub fn resolved_overlap_tokens(&self) -> usize {
        self.overlap_tokens
            .or(self.overlap_size.map(|chars| chars / CHARS_PER_TOKEN))
            .unwrap_or(DEFAULT_OVERLAP_TOKENS)
    }

    /// Validate configuration values.
    ///
    /// Returns an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        let sizes = [
            ("max_chunk_tokens", self.max_chunk_tokens),
            ("max_chunk_size", self.max_chunk_size),
        ];
        for (name, value) in sizes {
            if value == Some(0) {
                return Err(format!("chunking.{} must be > 0", name));
            }
        }
        Ok(())
    }
}
