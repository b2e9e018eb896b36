//! Low-level text segmentation helpers shared by the splitters.
//!
//! All spans are byte ranges `(start, end)` into the text that was passed in,
//! always aligned to `char` boundaries and trimmed of surrounding whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

/// A blank line (optionally containing spaces) separates paragraphs.
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r]*\n\s*").expect("Invalid paragraph break regex"));

// Matches: `. ! ?` followed by whitespace or end of string.
// Abbreviations ("Dr. Smith") over-split, which is harmless for chunking.
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("Invalid sentence regex"));

static MARKDOWN_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,6}\s+\S").expect("Invalid heading regex"));

/// Longest line still considered an all-caps heading.
const MAX_CAPS_HEADING_LEN: usize = 80;

/// Trim whitespace from both ends of `text[start..end]`, returning the
/// narrowed span or `None` when nothing but whitespace remains.
pub fn trim_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &text[start..end];
    let leading = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let s = start + leading;
    Some((s, s + trimmed.len()))
}

/// Split text into paragraph spans (blank-line delimited).
pub fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut last = 0;
    for m in PARAGRAPH_BREAK.find_iter(text) {
        if let Some(span) = trim_span(text, last, m.start()) {
            spans.push(span);
        }
        last = m.end();
    }
    if let Some(span) = trim_span(text, last, text.len()) {
        spans.push(span);
    }
    spans
}

/// Split text into sentence spans.
///
/// Text without terminal punctuation comes back as a single span.
pub fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut last = 0;
    for m in SENTENCE_END.find_iter(text) {
        if let Some(span) = trim_span(text, last, m.end()) {
            spans.push(span);
        }
        last = m.end();
    }
    if last < text.len() {
        if let Some(span) = trim_span(text, last, text.len()) {
            spans.push(span);
        }
    }
    spans
}

/// Byte offset just past the first sentence terminator in `text`, if any
/// text follows it.
pub fn first_sentence_break(text: &str) -> Option<usize> {
    SENTENCE_END
        .find(text)
        .map(|m| m.end())
        .filter(|&end| end < text.len())
}

/// Heading heuristic: a markdown `#` line or a short all-caps line.
pub fn is_heading(paragraph: &str) -> bool {
    let trimmed = paragraph.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return MARKDOWN_HEADING.is_match(trimmed);
    }
    if MARKDOWN_HEADING.is_match(trimmed) {
        return true;
    }
    if trimmed.len() > MAX_CAPS_HEADING_LEN {
        return false;
    }
    let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 3 && letters.iter().all(|c| c.is_uppercase())
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Largest char boundary `<= idx`.
pub fn floor_char_boundary(text: &str, idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    let mut i = idx;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary `>= idx`.
pub fn ceil_char_boundary(text: &str, idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    let mut i = idx;
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Cut `text` to at most `max_bytes`, backing off to the last whitespace so
/// words are not split. Falls back to a hard cut when there is no whitespace.
pub fn truncate_at_word(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let cut = floor_char_boundary(text, max_bytes);
    let head = &text[..cut];
    match head.rfind(char::is_whitespace) {
        Some(ws) if ws > 0 => head[..ws].trim_end(),
        _ => head,
    }
}

/// Split a span into windows of at most `max_bytes`, breaking at whitespace.
///
/// Used as the last resort for sentences that exceed the chunk budget.
pub fn word_windows(text: &str, start: usize, end: usize, max_bytes: usize) -> Vec<(usize, usize)> {
    let max_bytes = max_bytes.max(1);
    let mut windows = Vec::new();
    let mut cursor = start;
    while cursor < end {
        let rest = &text[cursor..end];
        cursor += rest.len() - rest.trim_start().len();
        if cursor >= end {
            break;
        }
        let limit = floor_char_boundary(text, (cursor + max_bytes).min(end));
        let mut cut = if limit >= end {
            end
        } else {
            match text[cursor..limit].rfind(char::is_whitespace) {
                Some(ws) if ws > 0 => cursor + ws,
                _ => limit,
            }
        };
        if cut <= cursor {
            // A single char wider than max_bytes
            cut = ceil_char_boundary(text, cursor + 1);
        }
        if let Some(span) = trim_span(text, cursor, cut) {
            windows.push(span);
        }
        cursor = cut;
    }
    windows
}
