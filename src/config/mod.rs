//! Configuration management for ctxsmith

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::chunking::config::ChunkingOptions;

/// Per-invocation overrides, typically from command line flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkingOverrides {
    pub max_chunk_tokens: Option<usize>,
    pub overlap_tokens: Option<usize>,
    pub include_overview: Option<bool>,
}

impl Config {
    /// Get the config file path (~/.config/ctxsmith/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/ctxsmith)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save(self)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Validate every section, reporting the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.chunking.validate()?;
        self.timestamps.validate()?;
        self.relevance.validate()?;
        self.context.validate()
    }

    /// Engine options from this configuration.
    pub fn chunking_options(&self) -> ChunkingOptions {
        self.chunking_options_with(&ChunkingOverrides::default())
    }

    /// Engine options with explicit overrides applied.
    ///
    /// Precedence: override > token option > legacy character option > default.
    pub fn chunking_options_with(&self, overrides: &ChunkingOverrides) -> ChunkingOptions {
        let mut context = self.context.clone();
        if let Some(include) = overrides.include_overview {
            context.include_overview = include;
        }
        ChunkingOptions {
            max_chunk_tokens: overrides
                .max_chunk_tokens
                .unwrap_or_else(|| self.chunking.resolved_max_chunk_tokens()),
            overlap_tokens: overrides
                .overlap_tokens
                .unwrap_or_else(|| self.chunking.resolved_overlap_tokens()),
            preserve_structure: self.chunking.preserve_structure,
            prioritize_relevance: self.chunking.prioritize_relevance,
            timestamps: self.timestamps.clone(),
            relevance: self.relevance.clone(),
            context,
        }
    }
}
