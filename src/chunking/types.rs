//! Core data types for chunked content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::timestamp::{TimestampMetrics, TimestampRange};

/// Kind of source content being chunked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Text extracted from a PDF
    Pdf,
    /// YouTube transcript
    Youtube,
    /// Video transcript
    Video,
    /// Audio transcript
    Audio,
    /// Website HTML
    Website,
    /// Plain text
    Text,
}

impl ContentType {
    /// All content types, in display order.
    pub const ALL: [ContentType; 6] = [
        ContentType::Pdf,
        ContentType::Youtube,
        ContentType::Video,
        ContentType::Audio,
        ContentType::Website,
        ContentType::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Pdf => "pdf",
            ContentType::Youtube => "youtube",
            ContentType::Video => "video",
            ContentType::Audio => "audio",
            ContentType::Website => "website",
            ContentType::Text => "text",
        }
    }

    /// Timed media (carries timestamps or speaker turns).
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            ContentType::Youtube | ContentType::Video | ContentType::Audio
        )
    }

    /// Human-readable noun used in summaries and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Pdf => "PDF document",
            ContentType::Youtube => "YouTube video",
            ContentType::Video => "video",
            ContentType::Audio => "audio recording",
            ContentType::Website => "web page",
            ContentType::Text => "text document",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a content-type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown content type '{0}'. Valid: pdf, youtube, video, audio, website, text")]
pub struct ParseContentTypeError(pub String);

impl FromStr for ContentType {
    type Err = ParseContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ContentType::Pdf),
            "youtube" | "yt" => Ok(ContentType::Youtube),
            "video" => Ok(ContentType::Video),
            "audio" => Ok(ContentType::Audio),
            "website" | "web" | "html" => Ok(ContentType::Website),
            "text" | "txt" | "plain" => Ok(ContentType::Text),
            _ => Err(ParseContentTypeError(s.to_string())),
        }
    }
}

/// Structural and descriptive signals attached to a chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    pub has_headings: bool,
    pub has_lists: bool,
    pub has_code: bool,
    pub has_math: bool,
    pub word_count: usize,
    pub key_terms: Vec<String>,
    pub content_type: ContentType,
    /// Page the chunk came from (PDFs with page markers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Speakers with turns in this chunk (speaker-split audio)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub speakers: Vec<String>,
    /// Timing diagnostics; only on the first chunk of a timed document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_metrics: Option<TimestampMetrics>,
}

/// A bounded slice of source content prepared for a model prompt.
///
/// Chunks are immutable once created. Overlap injection builds a new chunk
/// rather than editing an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChunk {
    /// `{content_type}-chunk-{index}`
    pub id: String,
    pub content: String,
    /// 0-based position within the document
    pub index: usize,
    /// Byte offset into the split text where this chunk starts
    pub start_offset: usize,
    /// Byte offset into the split text where this chunk ends (exclusive)
    pub end_offset: usize,
    /// Heuristic 0.0 - 1.0 priority signal
    pub relevance_score: f64,
    pub token_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_range: Option<TimestampRange>,
    /// Byte length of the overlap prefix copied from the previous chunk
    #[serde(default)]
    pub overlap_len: usize,
    pub metadata: ChunkMetadata,
}

impl ContentChunk {
    /// Stable id for the chunk at `index` of a document of `content_type`.
    pub fn make_id(content_type: ContentType, index: usize) -> String {
        format!("{}-chunk-{}", content_type, index)
    }

    /// Chunk content without the injected overlap prefix.
    pub fn body(&self) -> &str {
        self.content.get(self.overlap_len..).unwrap_or(&self.content)
    }

    /// The injected overlap prefix, empty for chunks without one.
    pub fn overlap(&self) -> &str {
        self.content.get(..self.overlap_len).unwrap_or("")
    }

    /// Length of the source range this chunk was cut from.
    pub fn source_len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }
}

/// Aggregate result of one chunking pass over a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkedContent {
    pub chunks: Vec<ContentChunk>,
    pub summary: String,
    /// Length of the input in bytes
    pub total_length: usize,
    pub total_tokens: usize,
    /// Suggested context size for a model call over this document
    pub optimal_context_window: usize,
    pub key_topics: Vec<String>,
}

impl ChunkedContent {
    /// Result for empty or whitespace-only input. Every total is zero.
    pub fn empty() -> Self {
        Self {
            chunks: Vec::new(),
            summary: String::new(),
            total_length: 0,
            total_tokens: 0,
            optimal_context_window: 0,
            key_topics: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Chunks ordered by relevance, highest first (ties keep document order).
    pub fn ranked(&self) -> Vec<&ContentChunk> {
        let mut ranked: Vec<&ContentChunk> = self.chunks.iter().collect();
        ranked.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        ranked
    }
}

/// A chunk candidate produced by a splitter, before assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChunk {
    pub content: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub timestamp_range: Option<TimestampRange>,
    pub page_number: Option<u32>,
    pub speakers: Vec<String>,
    pub timestamp_metrics: Option<TimestampMetrics>,
}

impl RawChunk {
    /// Candidate that is an exact slice of `source`.
    pub fn from_span(source: &str, start: usize, end: usize) -> Self {
        Self {
            content: source[start..end].to_string(),
            start_offset: start,
            end_offset: end,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: Option<u32>) -> Self {
        self.page_number = page;
        self
    }
}
