//! Inter-chunk overlap injection.

use crate::chunking::config::CHARS_PER_TOKEN;
use crate::chunking::text::{ceil_char_boundary, first_sentence_break};
use crate::chunking::tokens::TokenEstimator;
use crate::chunking::types::ContentChunk;

/// Lead-in marking copied context.
const OVERLAP_MARKER: &str = "...";

/// Prefix every chunk but the first with the tail of the previous one.
///
/// The tail is about `overlap_tokens` worth of characters from the end of
/// the previous chunk's body, starting at the first sentence boundary inside
/// that window (or the first word boundary when there is none). Returns new
/// chunks; the inputs are untouched. Timed chunks already overlap through
/// their seed segments and are returned unchanged.
pub fn add_overlap(
    chunks: &[ContentChunk],
    overlap_tokens: usize,
    estimator: &TokenEstimator,
) -> Vec<ContentChunk> {
    if overlap_tokens == 0 || chunks.iter().any(|c| c.timestamp_range.is_some()) {
        return chunks.to_vec();
    }

    let window = overlap_tokens * CHARS_PER_TOKEN;
    let mut result = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let tail = match i.checked_sub(1).map(|p| &chunks[p]) {
            Some(previous) => overlap_tail(previous.body(), window),
            None => "",
        };
        if tail.is_empty() {
            result.push(chunk.clone());
            continue;
        }

        let prefix = format!("{}{}\n\n", OVERLAP_MARKER, tail);
        let content = format!("{}{}", prefix, chunk.body());
        let mut overlapped = chunk.clone();
        overlapped.token_count = estimator.estimate_tokens(&content);
        overlapped.overlap_len = prefix.len();
        overlapped.content = content;
        result.push(overlapped);
    }
    result
}

/// Trailing part of `body` of at most `window` bytes, cut at a boundary.
fn overlap_tail(body: &str, window: usize) -> &str {
    let body = body.trim_end();
    if body.len() <= window {
        return body.trim_start();
    }
    let start = ceil_char_boundary(body, body.len() - window);
    let candidate = &body[start..];
    let cut = first_sentence_break(candidate)
        .or_else(|| candidate.find(char::is_whitespace))
        .unwrap_or(0);
    candidate[cut..].trim()
}
