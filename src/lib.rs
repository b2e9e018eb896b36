//! ctxsmith library
//!
//! Chunking and token budgeting for long-form content: PDFs, transcripts,
//! web pages and plain text are split into token-bounded chunks with
//! relevance scores and timestamps, then assembled into prompt contexts.

pub mod chapters;
pub mod chunking;
pub mod config;

pub use chapters::{build_chapter_prompt, parse_chapters, Chapter, ChapterError, ChapterHints};
pub use chunking::{
    chunk_content, chunk_many, select_chunks_for_context, ChunkedContent, ChunkingOptions,
    ContentChunk, ContentChunker, ContentType,
};
pub use config::Config;
