//! Chunking entry points.
//!
//! Each pass is a pure function of `(content, content_type, options)`.

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

use super::assemble::{rank_terms, ChunkAssembler};
use super::config::ChunkingOptions;
use super::splitter::{splitter_for, SplitOptions};
use super::text::{first_sentence_break, truncate_at_word};
use super::tokens::TokenEstimator;
use super::types::{ChunkedContent, ContentType};

/// Key topics reported per document.
pub const MAX_KEY_TOPICS: usize = 10;

/// Context windows are suggested in steps of this many tokens.
const CONTEXT_WINDOW_STEP: usize = 500;

/// Headroom over the document estimate when suggesting a context window.
const CONTEXT_WINDOW_HEADROOM: f64 = 1.1;

const LEAD_SENTENCE_MAX_BYTES: usize = 200;

// Matches leading timestamp and speaker labels stripped from the summary
// lead sentence.
static LEADING_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\s*[\[(](?:\d{1,2}:)?\d{1,2}:\d{2}[\])]\s*|\s*(?:\d{1,2}:)?\d{1,2}:\d{2}\s+)+")
        .expect("Invalid leading label regex")
});

/// Chunks documents with one fixed set of options.
#[derive(Debug, Clone)]
pub struct ContentChunker {
    options: ChunkingOptions,
    assembler: ChunkAssembler,
}

impl ContentChunker {
    pub fn new(options: ChunkingOptions) -> Self {
        let assembler = ChunkAssembler::new(TokenEstimator::default(), &options.relevance);
        Self { options, assembler }
    }

    pub fn options(&self) -> &ChunkingOptions {
        &self.options
    }

    /// Split, assemble and summarize one document.
    ///
    /// Empty or whitespace-only content yields an empty result with zero
    /// totals.
    pub fn chunk_content(&self, content: &str, content_type: ContentType) -> ChunkedContent {
        if content.trim().is_empty() {
            return ChunkedContent::empty();
        }

        let splitter = splitter_for(content_type);
        let prepared = splitter.prepare(content);
        let estimator = self.assembler.estimator();
        let split_options = SplitOptions {
            max_tokens: self.options.effective_max_tokens(),
            preserve_structure: self.options.preserve_structure,
            timestamps: &self.options.timestamps,
            estimator,
        };

        let raws = splitter.split(&prepared, &split_options);
        debug!(
            splitter = splitter.name(),
            content_type = %content_type,
            candidates = raws.len(),
            "split content"
        );
        let chunks = self.assembler.assemble(
            raws,
            content_type,
            self.options.effective_overlap_tokens(),
        );
        if chunks.is_empty() {
            return ChunkedContent::empty();
        }

        let total_tokens = estimator.estimate_tokens(&prepared);
        let key_topics = rank_terms(
            chunks
                .iter()
                .flat_map(|c| c.metadata.key_terms.iter().cloned()),
            MAX_KEY_TOPICS,
        );
        let lead = chunks.first().map(|c| lead_sentence(c.body())).unwrap_or_default();
        let summary = summarize(content_type, chunks.len(), total_tokens, &lead);

        ChunkedContent {
            summary,
            total_length: content.len(),
            total_tokens,
            optimal_context_window: optimal_context_window(
                total_tokens,
                self.options.context.max_context_tokens,
            ),
            key_topics,
            chunks,
        }
    }
}

impl Default for ContentChunker {
    fn default() -> Self {
        Self::new(ChunkingOptions::default())
    }
}

/// Chunk one document.
pub fn chunk_content(
    content: &str,
    content_type: ContentType,
    options: &ChunkingOptions,
) -> ChunkedContent {
    ContentChunker::new(options.clone()).chunk_content(content, content_type)
}

/// Chunk independent documents in parallel. Results keep input order.
pub fn chunk_many(documents: &[(&str, ContentType)], options: &ChunkingOptions) -> Vec<ChunkedContent> {
    let chunker = ContentChunker::new(options.clone());
    documents
        .par_iter()
        .map(|(content, content_type)| chunker.chunk_content(content, *content_type))
        .collect()
}

/// `min(total * 1.1, cap)` rounded up to a multiple of 500; 0 for empty
/// documents.
pub fn optimal_context_window(total_tokens: usize, max_context_tokens: usize) -> usize {
    if total_tokens == 0 {
        return 0;
    }
    let wanted = ((total_tokens as f64 * CONTEXT_WINDOW_HEADROOM).ceil() as usize)
        .min(max_context_tokens);
    (wanted + CONTEXT_WINDOW_STEP - 1) / CONTEXT_WINDOW_STEP * CONTEXT_WINDOW_STEP
}

fn summarize(content_type: ContentType, sections: usize, tokens: usize, lead: &str) -> String {
    let plural = if sections == 1 { "" } else { "s" };
    let mut summary = format!(
        "{} with {} section{}, about {} tokens.",
        capitalize(content_type.label()),
        sections,
        plural,
        tokens
    );
    if !lead.is_empty() {
        summary.push(' ');
        summary.push_str(lead);
    }
    summary
}

/// First sentence of `text` without leading timestamp labels, collapsed to
/// one line and cut at a word boundary.
fn lead_sentence(text: &str) -> String {
    let stripped = LEADING_LABEL.replace(text.trim_start(), "");
    let first = match first_sentence_break(&stripped) {
        Some(end) => &stripped[..end],
        None => &stripped[..],
    };
    let one_line = first.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = truncate_at_word(&one_line, LEAD_SENTENCE_MAX_BYTES);
    if cut.len() < one_line.len() {
        format!("{}...", cut)
    } else {
        cut.to_string()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
