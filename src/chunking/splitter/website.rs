//! Website splitting.
//!
//! HTML is first normalized into plain text with `##` heading lines and
//! `---` section separators; the structural splitter then runs per section.
//! Chunk offsets refer to the normalized text.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::structural::split_structured;
use super::{ContentSplitter, SplitOptions};
use crate::chunking::types::RawChunk;

/// Separator line between website sections in normalized text.
pub const SECTION_SEPARATOR: &str = "---";

static DROPPED_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style|head|noscript|template|svg)\b[^>]*>.*?</(?:script|style|head|noscript|template|svg)\s*>|<!--.*?-->")
        .expect("Invalid dropped block regex")
});

static SECTION_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?\s*(?:header|section|article|main|footer|nav|aside)\b[^>]*>")
        .expect("Invalid section tag regex")
});

static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<h([1-6])\b[^>]*>(.*?)</h[1-6]\s*>").expect("Invalid heading regex")
});

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid line break regex"));

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<li\b[^>]*>").expect("Invalid list item regex"));

static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?\s*(?:p|div|ul|ol|table|tr|blockquote|pre|figure|dl|dt|dd)\b[^>]*>")
        .expect("Invalid block tag regex")
});

static ANY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z]{2,8});").expect("Invalid entity regex")
});

static HORIZONTAL_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\u{a0}]+").expect("Invalid whitespace regex"));

/// Website splitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebsiteSplitter;

impl ContentSplitter for WebsiteSplitter {
    fn name(&self) -> &'static str {
        "website"
    }

    fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        Cow::Owned(normalize_html(text))
    }

    fn split(&self, text: &str, options: &SplitOptions<'_>) -> Vec<RawChunk> {
        if !options.preserve_structure {
            return split_structured(text, 0, text.len(), options);
        }
        let sections = section_spans(text);
        debug!(sections = sections.len(), "website sections");
        sections
            .into_iter()
            .flat_map(|(start, end)| split_structured(text, start, end, options))
            .collect()
    }
}

/// Byte ranges of the sections of normalized text, separators excluded.
fn section_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end() == SECTION_SEPARATOR {
            if offset > start {
                spans.push((start, offset));
            }
            start = offset + line.len();
        }
        offset += line.len();
    }
    if text.len() > start {
        spans.push((start, text.len()));
    }
    spans
}

/// Convert HTML into plain text that keeps its structure.
///
/// Scripts, styles, the document head and comments are dropped.
/// `<header>`, `<section>`, `<article>` (and similar landmarks) become `---`
/// section separators, `<h1>`-`<h6>` become markdown heading lines, list
/// items become `- ` lines, and the remaining tags are stripped. Entities
/// are decoded and whitespace is collapsed.
pub fn normalize_html(html: &str) -> String {
    let text = DROPPED_BLOCKS.replace_all(html, " ");
    let text = SECTION_TAG.replace_all(&text, "\n\n---\n\n");
    let text = HEADING.replace_all(&text, |caps: &Captures<'_>| {
        let level: usize = caps[1].parse().unwrap_or(2);
        let inner = ANY_TAG.replace_all(&caps[2], " ");
        let inner = HORIZONTAL_SPACE.replace_all(inner.trim(), " ");
        format!("\n\n{} {}\n\n", "#".repeat(level), inner.replace('\n', " "))
    });
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = LIST_ITEM.replace_all(&text, "\n- ");
    let text = BLOCK_TAG.replace_all(&text, "\n\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    // Collapse whitespace line by line, then rebuild sections
    let mut sections: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut blank = false;
    for raw in text.lines() {
        let line = HORIZONTAL_SPACE.replace_all(raw.trim(), " ").into_owned();
        if line == SECTION_SEPARATOR {
            push_section(&mut sections, &mut current);
            blank = false;
            continue;
        }
        if line.is_empty() {
            blank = true;
            continue;
        }
        if blank && !current.is_empty() {
            current.push(String::new());
        }
        blank = false;
        current.push(line);
    }
    push_section(&mut sections, &mut current);

    sections.join(&format!("\n\n{}\n\n", SECTION_SEPARATOR))
}

fn push_section(sections: &mut Vec<String>, lines: &mut Vec<String>) {
    if lines.iter().any(|l| !l.is_empty()) {
        sections.push(lines.join("\n").trim().to_string());
    }
    lines.clear();
}

fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures<'_>| {
        let name = &caps[1];
        let hex = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"));
        let decoded = if let Some(hex) = hex {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = name.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            named_entity(name)
        };
        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "times" => '\u{d7}',
        "deg" => '\u{b0}',
        _ => return None,
    })
}
