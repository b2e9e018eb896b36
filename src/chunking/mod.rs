//! Chunking engine.
//!
//! Turns long-form content (PDF text, transcripts, web pages, plain text)
//! into ordered, token-budgeted chunks with relevance scores, timestamp
//! ranges and structural metadata, and assembles chunks back into a
//! bounded prompt context.
//!
//! The engine is pure and synchronous: every operation is a function of its
//! inputs and degenerate input produces an empty result instead of an error.
//!
//! ```text
//! content ──> splitter ──> RawChunk* ──> ChunkAssembler ──> ContentChunk*
//!                                                              │
//!                       ContextSelector <── ChunkedContent <───┘
//! ```

pub mod assemble;
pub mod config;
pub mod context;
pub mod pipeline;
pub mod relevance;
pub mod rules;
pub mod splitter;
pub mod strategy;
pub mod text;
pub mod timestamp;
pub mod tokens;
pub mod types;

pub use assemble::ChunkAssembler;
pub use config::{ChunkingOptions, ContextOptions, TimestampOptions, CHARS_PER_TOKEN};
pub use context::{select_chunks_for_context, ContextSelector};
pub use pipeline::{chunk_content, chunk_many, ContentChunker};
pub use relevance::{RelevanceScorer, RelevanceWeights};
pub use splitter::{splitter_for, ContentSplitter, SplitOptions};
pub use tokens::{count_tokens, estimate_tokens, TextKind, TokenCount, TokenEstimator};
pub use types::{
    ChunkMetadata, ChunkedContent, ContentChunk, ContentType, ParseContentTypeError, RawChunk,
};
