//! Chapter response parsing and validation.
//!
//! Language models wrap JSON in prose or code fences, mix number and clock
//! notations for times, and occasionally produce positions outside the
//! document. Parsing accepts all of these shapes; validation repairs what
//! it can and drops what it can't.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::prompt::ChapterHints;
use crate::chunking::timestamp::{format_seconds_to_timestamp, parse_timestamp_to_seconds};

/// Errors from chapter response parsing.
#[derive(Debug, Error)]
pub enum ChapterError {
    #[error("Failed to extract chapter JSON from response")]
    JsonExtraction { response: String },

    #[error("Response contains no usable chapters")]
    NoChapters,
}

/// A validated chapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    /// `start_time` as `M:SS`/`H:MM:SS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<String>,
}

impl Chapter {
    /// Sort key: start time, else start page.
    fn position(&self) -> Option<f64> {
        self.start_time.or(self.start_page.map(f64::from))
    }
}

/// Time as the model wrote it: seconds or a clock string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TimeValue {
    Seconds(f64),
    Clock(String),
}

impl TimeValue {
    fn seconds(&self) -> Option<f64> {
        match self {
            TimeValue::Seconds(s) if s.is_finite() => Some(*s),
            TimeValue::Seconds(_) => None,
            TimeValue::Clock(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|s| s.is_finite())
                .or_else(|| parse_timestamp_to_seconds(raw)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChapter {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "description")]
    summary: Option<String>,
    #[serde(default, alias = "start_page")]
    start_page: Option<i64>,
    #[serde(default, alias = "end_page")]
    end_page: Option<i64>,
    #[serde(default, alias = "start_time", alias = "start")]
    start_time: Option<TimeValue>,
    #[serde(default, alias = "end_time", alias = "end")]
    end_time: Option<TimeValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChapterList {
    Wrapped { chapters: Vec<RawChapter> },
    Bare(Vec<RawChapter>),
}

impl ChapterList {
    fn into_vec(self) -> Vec<RawChapter> {
        match self {
            ChapterList::Wrapped { chapters } => chapters,
            ChapterList::Bare(chapters) => chapters,
        }
    }
}

/// Parse and validate chapters from a model response.
///
/// Accepts raw JSON, JSON in a markdown code fence, or JSON embedded in
/// prose, shaped as `{"chapters": [...]}` or a bare array.
pub fn parse_chapters(response: &str, hints: &ChapterHints) -> Result<Vec<Chapter>, ChapterError> {
    let raws = extract_chapter_list(response)?;
    let chapters = validate_chapters(raws, hints);
    if chapters.is_empty() {
        return Err(ChapterError::NoChapters);
    }
    Ok(chapters)
}

fn extract_chapter_list(response: &str) -> Result<Vec<RawChapter>, ChapterError> {
    let trimmed = response.trim();

    if let Ok(parsed) = serde_json::from_str::<ChapterList>(trimmed) {
        return Ok(parsed.into_vec());
    }

    if let Some(json_str) = extract_from_code_block(trimmed) {
        if let Ok(parsed) = serde_json::from_str::<ChapterList>(json_str) {
            return Ok(parsed.into_vec());
        }
    }

    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (trimmed.find(open), trimmed.rfind(close)) {
            if start < end {
                if let Ok(parsed) = serde_json::from_str::<ChapterList>(&trimmed[start..=end]) {
                    return Ok(parsed.into_vec());
                }
            }
        }
    }

    Err(ChapterError::JsonExtraction {
        response: response.to_string(),
    })
}

fn extract_from_code_block(text: &str) -> Option<&str> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = text.find(pattern) {
            let json_start = start + pattern.len();
            if let Some(end) = text[json_start..].find("```") {
                return Some(&text[json_start..json_start + end]);
            }
        }
    }
    None
}

/// Repair or drop raw chapters, then order them by position.
fn validate_chapters(raws: Vec<RawChapter>, hints: &ChapterHints) -> Vec<Chapter> {
    let mut chapters: Vec<Chapter> = raws
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| validate_chapter(raw, i, hints))
        .collect();

    chapters.sort_by(|a, b| {
        let a = a.position().unwrap_or(f64::INFINITY);
        let b = b.position().unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });

    assign_ids(&mut chapters);
    chapters
}

/// Give every chapter a unique id. Missing and repeated ids are replaced
/// with `chapter-N`, where N starts at the chapter's ordinal and skips ids
/// already in use.
fn assign_ids(chapters: &mut [Chapter]) {
    let mut taken: HashSet<String> = HashSet::new();
    let mut needs_id = Vec::new();
    for (i, chapter) in chapters.iter().enumerate() {
        if chapter.id.is_empty() {
            needs_id.push(i);
        } else if !taken.insert(chapter.id.clone()) {
            warn!(chapter = i, id = %chapter.id, "replacing duplicate chapter id");
            needs_id.push(i);
        }
    }

    for i in needs_id {
        let mut n = i + 1;
        while taken.contains(&format!("chapter-{}", n)) {
            n += 1;
        }
        let id = format!("chapter-{}", n);
        taken.insert(id.clone());
        chapters[i].id = id;
    }
}

fn validate_chapter(raw: RawChapter, position: usize, hints: &ChapterHints) -> Option<Chapter> {
    let title = raw.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        warn!(chapter = position, "dropping chapter without title");
        return None;
    }

    let max_page = hints.page_count.map(i64::from).unwrap_or(i64::from(u32::MAX)).max(1);
    let clamp_page = |page: i64| page.clamp(1, max_page) as u32;
    let start_page = raw.start_page.or(raw.end_page).map(clamp_page);
    let end_page = raw
        .end_page
        .or(raw.start_page)
        .map(clamp_page)
        .zip(start_page)
        .map(|(end, start)| end.max(start));

    let max_time = hints
        .duration_seconds
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(f64::INFINITY);
    let clamp_time = |t: f64| t.clamp(0.0, max_time);
    let start_time = time_or_warn(raw.start_time.as_ref(), position, "start").map(clamp_time);
    let end_time = time_or_warn(raw.end_time.as_ref(), position, "end")
        .map(clamp_time)
        .map(|end| match start_time {
            Some(start) => end.max(start),
            None => end,
        });

    Some(Chapter {
        id: raw
            .id
            .map(|id| id.trim().to_string())
            .unwrap_or_default(),
        title: title.to_string(),
        summary: raw.summary.map(|s| s.trim().to_string()).unwrap_or_default(),
        start_page,
        end_page,
        start_time,
        end_time,
        start_timestamp: start_time.map(format_seconds_to_timestamp),
        end_timestamp: end_time.map(format_seconds_to_timestamp),
    })
}

fn time_or_warn(value: Option<&TimeValue>, position: usize, which: &str) -> Option<f64> {
    let value = value?;
    let seconds = value.seconds();
    if seconds.is_none() {
        warn!(chapter = position, which, value = ?value, "ignoring unparseable chapter time");
    }
    seconds
}
