//! Engine options.
//!
//! [`ChunkingOptions`] is built once at the call boundary (CLI flags, config
//! file, library caller) and passed by reference through the pipeline.
//! Nothing below the boundary re-derives defaults.

use serde::{Deserialize, Serialize};

use super::relevance::RelevanceWeights;

/// Approximate characters per token used to convert token budgets into
/// character budgets.
pub const CHARS_PER_TOKEN: usize = 4;

/// Default chunk size in tokens.
pub const DEFAULT_MAX_CHUNK_TOKENS: usize = 1000;

/// Default overlap between consecutive chunks in tokens.
pub const DEFAULT_OVERLAP_TOKENS: usize = 100;

/// Smallest accepted chunk size.
pub const MIN_CHUNK_TOKENS: usize = 50;

/// Timing parameters for timestamp-aware media splitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampOptions {
    /// Largest silence (seconds) bridged when merging segments
    #[serde(default = "default_merge_max_gap")]
    pub merge_max_gap: f64,
    /// Longest merged segment (seconds)
    #[serde(default = "default_merge_max_duration")]
    pub merge_max_duration: f64,
    /// Segments longer than this (seconds) are split
    #[serde(default = "default_split_max_duration")]
    pub split_max_duration: f64,
    /// Seconds of trailing segments carried into the next chunk
    #[serde(default = "default_overlap_seconds")]
    pub overlap_seconds: f64,
}

pub fn default_merge_max_gap() -> f64 {
    2.0
}

pub fn default_merge_max_duration() -> f64 {
    45.0
}

pub fn default_split_max_duration() -> f64 {
    60.0
}

pub fn default_overlap_seconds() -> f64 {
    15.0
}

impl Default for TimestampOptions {
    fn default() -> Self {
        Self {
            merge_max_gap: default_merge_max_gap(),
            merge_max_duration: default_merge_max_duration(),
            split_max_duration: default_split_max_duration(),
            overlap_seconds: default_overlap_seconds(),
        }
    }
}

impl TimestampOptions {
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("merge_max_duration", self.merge_max_duration),
            ("split_max_duration", self.split_max_duration),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("timestamps.{} must be > 0", name));
            }
        }
        let non_negative = [
            ("merge_max_gap", self.merge_max_gap),
            ("overlap_seconds", self.overlap_seconds),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("timestamps.{} must be >= 0", name));
            }
        }
        Ok(())
    }
}

/// Context assembly parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextOptions {
    /// Prepend an overview block (summary + key topics)
    #[serde(default = "default_include_overview")]
    pub include_overview: bool,
    /// Share of the budget the overview may use
    #[serde(default = "default_overview_fraction")]
    pub overview_fraction: f64,
    /// Upper bound for the suggested context window
    #[serde(default = "default_max_context_tokens")]
    pub max_context_tokens: usize,
}

pub fn default_include_overview() -> bool {
    true
}

pub fn default_overview_fraction() -> f64 {
    0.1
}

pub fn default_max_context_tokens() -> usize {
    100_000
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            include_overview: default_include_overview(),
            overview_fraction: default_overview_fraction(),
            max_context_tokens: default_max_context_tokens(),
        }
    }
}

impl ContextOptions {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=0.5).contains(&self.overview_fraction) {
            return Err(format!(
                "context.overview_fraction {} must be within 0.0..=0.5",
                self.overview_fraction
            ));
        }
        if self.max_context_tokens == 0 {
            return Err("context.max_context_tokens must be > 0".to_string());
        }
        Ok(())
    }
}

/// Options for one chunking pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkingOptions {
    pub max_chunk_tokens: usize,
    pub overlap_tokens: usize,
    /// Honor headings, pages and website sections as boundaries
    pub preserve_structure: bool,
    /// Context selection by relevance instead of document order
    pub prioritize_relevance: bool,
    pub timestamps: TimestampOptions,
    pub relevance: RelevanceWeights,
    pub context: ContextOptions,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            max_chunk_tokens: DEFAULT_MAX_CHUNK_TOKENS,
            overlap_tokens: DEFAULT_OVERLAP_TOKENS,
            preserve_structure: true,
            prioritize_relevance: true,
            timestamps: TimestampOptions::default(),
            relevance: RelevanceWeights::default(),
            context: ContextOptions::default(),
        }
    }
}

impl ChunkingOptions {
    /// Default options with a different chunk size.
    pub fn with_max_chunk_tokens(max_chunk_tokens: usize) -> Self {
        Self {
            max_chunk_tokens,
            ..Self::default()
        }
    }

    /// Chunk size actually used: never below [`MIN_CHUNK_TOKENS`].
    pub fn effective_max_tokens(&self) -> usize {
        self.max_chunk_tokens.max(MIN_CHUNK_TOKENS)
    }

    /// Overlap actually used: at most half a chunk.
    pub fn effective_overlap_tokens(&self) -> usize {
        self.overlap_tokens.min(self.effective_max_tokens() / 2)
    }

    /// Character budget for a chunk.
    pub fn max_chunk_chars(&self) -> usize {
        self.effective_max_tokens() * CHARS_PER_TOKEN
    }
}
