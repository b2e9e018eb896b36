//! Budget-constrained context assembly.

use tracing::trace;

use super::config::{ChunkingOptions, ContextOptions, CHARS_PER_TOKEN};
use super::text::truncate_at_word;
use super::types::{ChunkedContent, ContentChunk};

const TRUNCATION_MARKER: &str = "...";
const SECTION_GAP: &str = "\n\n";

/// Selects and concatenates chunks into a prompt context of bounded size.
#[derive(Debug, Clone)]
pub struct ContextSelector {
    options: ContextOptions,
    prioritize_relevance: bool,
}

impl ContextSelector {
    pub fn new(options: ContextOptions, prioritize_relevance: bool) -> Self {
        Self {
            options,
            prioritize_relevance,
        }
    }

    /// Build a context of at most `max_tokens * 4` bytes.
    ///
    /// An optional overview (summary and key topics) takes at most
    /// `overview_fraction` of the budget. Chunks follow as `[Section N]`
    /// blocks, highest relevance first, while they fit. The first chunk that
    /// does not fit is truncated into the remaining space if less than half
    /// the budget has been used; otherwise selection stops.
    pub fn select(&self, chunked: &ChunkedContent, max_tokens: usize) -> String {
        let budget = max_tokens * CHARS_PER_TOKEN;
        let mut out = String::new();
        if budget == 0 || chunked.chunks.is_empty() {
            return out;
        }

        if self.options.include_overview {
            let cap = (budget as f64 * self.options.overview_fraction) as usize;
            if let Some(overview) = overview_block(chunked, cap) {
                out.push_str(&overview);
            }
        }

        let ordered: Vec<&ContentChunk> = if self.prioritize_relevance {
            chunked.ranked()
        } else {
            chunked.chunks.iter().collect()
        };

        for chunk in ordered {
            let header = format!("[Section {}]\n", chunk.index + 1);
            let full_len = header.len() + chunk.content.len() + SECTION_GAP.len();
            if out.len() + full_len <= budget {
                trace!(chunk = %chunk.id, score = chunk.relevance_score, "included");
                out.push_str(&header);
                out.push_str(&chunk.content);
                out.push_str(SECTION_GAP);
                continue;
            }

            if out.len() < budget / 2 {
                let overhead = header.len() + TRUNCATION_MARKER.len() + SECTION_GAP.len();
                let room = budget.saturating_sub(out.len() + overhead);
                let partial = truncate_at_word(&chunk.content, room);
                if !partial.trim().is_empty() {
                    trace!(chunk = %chunk.id, kept = partial.len(), "truncated");
                    out.push_str(&header);
                    out.push_str(partial);
                    out.push_str(TRUNCATION_MARKER);
                    out.push_str(SECTION_GAP);
                }
            }
            trace!(chunk = %chunk.id, used = out.len(), budget, "budget exhausted");
            break;
        }

        out.truncate(out.trim_end().len());
        out
    }
}

impl Default for ContextSelector {
    fn default() -> Self {
        Self::new(ContextOptions::default(), true)
    }
}

/// `Overview:` block limited to `cap` bytes, or `None` when nothing fits.
fn overview_block(chunked: &ChunkedContent, cap: usize) -> Option<String> {
    if chunked.summary.trim().is_empty() {
        return None;
    }
    let mut block = format!("Overview:\n{}\n", chunked.summary.trim());
    if !chunked.key_topics.is_empty() {
        block.push_str(&format!("Key topics: {}\n", chunked.key_topics.join(", ")));
    }
    block.push('\n');
    if block.len() <= cap {
        return Some(block);
    }

    let marker_len = TRUNCATION_MARKER.len() + SECTION_GAP.len();
    let partial = truncate_at_word(&block, cap.saturating_sub(marker_len));
    if partial.len() <= "Overview:".len() {
        return None;
    }
    Some(format!("{}{}{}", partial.trim_end(), TRUNCATION_MARKER, SECTION_GAP))
}

/// Select chunks for a model context with the given options.
pub fn select_chunks_for_context(
    chunked: &ChunkedContent,
    max_tokens: usize,
    options: &ChunkingOptions,
) -> String {
    ContextSelector::new(options.context.clone(), options.prioritize_relevance)
        .select(chunked, max_tokens)
}
