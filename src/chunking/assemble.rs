//! Chunk assembly: wraps raw candidates into scored [`ContentChunk`]s.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::relevance::{RelevanceScorer, RelevanceWeights, StructureSignals};
use super::splitter::add_overlap;
use super::text::{is_heading, word_count};
use super::tokens::TokenEstimator;
use super::types::{ChunkMetadata, ContentChunk, ContentType, RawChunk};

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[-*+\u{2022}]|\d{1,3}[.)])[ \t]+\S").expect("Invalid list regex")
});

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:```|~~~)").expect("Invalid code fence regex"));

// Matches: $$...$$, \( \), \[ \], \begin{...}, or inline $x^2$ (no spaces
// just inside the dollars, so "$5 and $10" is not math).
static MATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\$|\\\(|\\\[|\\begin\{|\$[^$\s](?:[^$\n]*[^$\s])?\$")
        .expect("Invalid math regex")
});

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}][\p{L}\p{N}'\-]*").expect("Invalid word regex"));

/// Maximum key terms reported per chunk.
pub const MAX_KEY_TERMS: usize = 5;

/// Minimum length (in chars) of a key term.
const MIN_KEY_TERM_CHARS: usize = 4;

/// Builds chunks from splitter output.
#[derive(Debug, Clone)]
pub struct ChunkAssembler {
    estimator: TokenEstimator,
    scorer: RelevanceScorer,
    stop_words: HashSet<String>,
}

impl ChunkAssembler {
    pub fn new(estimator: TokenEstimator, weights: &RelevanceWeights) -> Self {
        Self {
            estimator,
            scorer: RelevanceScorer::new(weights),
            stop_words: weights.stop_words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn estimator(&self) -> &TokenEstimator {
        &self.estimator
    }

    /// Wrap one raw candidate: token count, structural signals, key terms
    /// and relevance score.
    pub fn create_chunk(
        &self,
        raw: RawChunk,
        index: usize,
        content_type: ContentType,
    ) -> ContentChunk {
        let text = raw.content.as_str();
        let signals = StructureSignals {
            has_headings: text.lines().any(is_heading),
            has_lists: LIST_ITEM.is_match(text),
            has_code: CODE_FENCE.is_match(text),
            has_math: MATH.is_match(text),
            word_count: word_count(text),
        };
        let relevance_score = self.scorer.score(text, &signals, content_type);
        let token_count = self.estimator.estimate_tokens(text);
        let key_terms = self.key_terms(text);

        ContentChunk {
            id: ContentChunk::make_id(content_type, index),
            index,
            start_offset: raw.start_offset,
            end_offset: raw.end_offset,
            relevance_score,
            token_count,
            timestamp_range: raw.timestamp_range,
            overlap_len: 0,
            metadata: ChunkMetadata {
                has_headings: signals.has_headings,
                has_lists: signals.has_lists,
                has_code: signals.has_code,
                has_math: signals.has_math,
                word_count: signals.word_count,
                key_terms,
                content_type,
                page_number: raw.page_number,
                speakers: raw.speakers,
                timestamp_metrics: raw.timestamp_metrics,
            },
            content: raw.content,
        }
    }

    /// Assemble all candidates of a document and inject overlap.
    pub fn assemble(
        &self,
        raws: Vec<RawChunk>,
        content_type: ContentType,
        overlap_tokens: usize,
    ) -> Vec<ContentChunk> {
        let chunks: Vec<ContentChunk> = raws
            .into_iter()
            .filter(|raw| !raw.content.trim().is_empty())
            .enumerate()
            .map(|(i, raw)| self.create_chunk(raw, i, content_type))
            .collect();
        add_overlap(&chunks, overlap_tokens, &self.estimator)
    }

    /// Up to [`MAX_KEY_TERMS`] frequent words longer than three characters
    /// that are not stop words. Ties keep first-occurrence order.
    pub fn key_terms(&self, text: &str) -> Vec<String> {
        rank_terms(
            WORD.find_iter(text)
                .map(|m| m.as_str().trim_matches(|c: char| c == '\'' || c == '-').to_lowercase())
                .filter(|w| w.chars().count() >= MIN_KEY_TERM_CHARS)
                .filter(|w| !self.stop_words.contains(w)),
            MAX_KEY_TERMS,
        )
    }
}

impl Default for ChunkAssembler {
    fn default() -> Self {
        Self::new(TokenEstimator::default(), &RelevanceWeights::default())
    }
}

/// Rank terms by frequency, ties by first occurrence, keeping `limit`.
pub(crate) fn rank_terms(terms: impl Iterator<Item = String>, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, term) in terms.enumerate() {
        counts.entry(term).or_insert((0, position)).0 += 1;
    }
    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(limit).map(|(term, _, _)| term).collect()
}
