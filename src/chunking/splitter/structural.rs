//! Paragraph-first splitting with heading boundaries.

use super::{ContentSplitter, SplitOptions};
use crate::chunking::text::{is_heading, paragraph_spans, sentence_spans, word_windows};
use crate::chunking::types::RawChunk;

/// A heading starts a new chunk once the current one holds this share of
/// the budget (in percent).
const HEADING_BREAK_PERCENT: usize = 30;

/// Generic text splitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralSplitter;

impl ContentSplitter for StructuralSplitter {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn split(&self, text: &str, options: &SplitOptions<'_>) -> Vec<RawChunk> {
        split_structured(text, 0, text.len(), options)
    }
}

/// Accumulates consecutive spans of one region into chunks.
struct Packer<'a> {
    text: &'a str,
    budget: usize,
    current: Option<(usize, usize)>,
    current_tokens: usize,
    out: Vec<RawChunk>,
}

impl<'a> Packer<'a> {
    fn new(text: &'a str, budget: usize) -> Self {
        Self {
            text,
            budget,
            current: None,
            current_tokens: 0,
            out: Vec::new(),
        }
    }

    fn would_overflow(&self, tokens: usize) -> bool {
        self.current.is_some() && self.current_tokens + tokens > self.budget
    }

    fn push(&mut self, (start, end): (usize, usize), tokens: usize) {
        self.current = Some(match self.current {
            Some((s, _)) => (s, end),
            None => (start, end),
        });
        self.current_tokens += tokens;
    }

    fn flush(&mut self) {
        if let Some((s, e)) = self.current.take() {
            self.out.push(RawChunk::from_span(self.text, s, e));
        }
        self.current_tokens = 0;
    }

    fn finish(mut self) -> Vec<RawChunk> {
        self.flush();
        self.out
    }
}

/// Split `text[start..end]` into chunk candidates of at most
/// `options.max_tokens` estimated tokens.
///
/// Paragraphs are packed greedily. With `preserve_structure`, a heading
/// paragraph closes the current chunk once it holds 30% of the budget.
/// A paragraph over budget is split at sentence boundaries, and a sentence
/// over budget at word boundaries. Every candidate is an exact slice of
/// `text`, so offsets map straight back to the source.
pub fn split_structured(
    text: &str,
    start: usize,
    end: usize,
    options: &SplitOptions<'_>,
) -> Vec<RawChunk> {
    let budget = options.max_tokens.max(1);
    let estimator = options.estimator;
    let mut packer = Packer::new(text, budget);

    for (ps, pe) in paragraph_spans(&text[start..end]) {
        let span = (start + ps, start + pe);
        let paragraph = &text[span.0..span.1];
        let tokens = estimator.estimate_tokens(paragraph);

        if options.preserve_structure
            && is_heading(paragraph)
            && packer.current_tokens * 100 >= budget * HEADING_BREAK_PERCENT
        {
            packer.flush();
        }

        if tokens > budget {
            packer.flush();
            split_oversized(&mut packer, span, options);
            continue;
        }

        if packer.would_overflow(tokens) {
            packer.flush();
        }
        packer.push(span, tokens);
    }

    packer.finish()
}

/// Pack the sentences of one oversized paragraph, breaking sentences that
/// are themselves over budget into word windows.
fn split_oversized(
    packer: &mut Packer<'_>,
    (start, end): (usize, usize),
    options: &SplitOptions<'_>,
) {
    let text = packer.text;
    let estimator = options.estimator;
    let budget = packer.budget;

    for (ss, se) in sentence_spans(&text[start..end]) {
        let span = (start + ss, start + se);
        let sentence = &text[span.0..span.1];
        let tokens = estimator.estimate_tokens(sentence);

        if tokens > budget {
            packer.flush();
            // Byte width proportional to the budget, so each window lands
            // near the token limit regardless of content kind.
            let width = (sentence.len() * budget / tokens.max(1)).max(1);
            for (ws, we) in word_windows(text, span.0, span.1, width) {
                let window_tokens = estimator.estimate_tokens(&text[ws..we]);
                packer.push((ws, we), window_tokens);
                packer.flush();
            }
            continue;
        }

        if packer.would_overflow(tokens) {
            packer.flush();
        }
        packer.push(span, tokens);
    }
    packer.flush();
}
