//! Video and audio transcript splitting.
//!
//! Strategies are tried in order: timestamps, then speaker turns (audio
//! only), then plain paragraphs.

use tracing::debug;

use super::speaker::split_by_speakers;
use super::structural::split_structured;
use super::{ContentSplitter, SplitOptions};
use crate::chunking::config::CHARS_PER_TOKEN;
use crate::chunking::strategy::{FallbackChain, Strategy};
use crate::chunking::timestamp::{
    calculate_timestamp_metrics, detect_timestamp_format, extract_timestamps_from_content,
    format_seconds_to_timestamp, merge_adjacent_segments, split_long_segments,
    split_oversized_segments, validate_timestamp_continuity, TimestampFormat, TimestampRange, TimestampedSegment,
};
use crate::chunking::types::RawChunk;

/// Transcript splitter for timed media.
#[derive(Debug, Clone, Copy)]
pub struct MediaSplitter {
    /// Try speaker-turn splitting when no timestamps are present
    speaker_fallback: bool,
}

impl MediaSplitter {
    pub fn video() -> Self {
        Self {
            speaker_fallback: false,
        }
    }

    pub fn audio() -> Self {
        Self {
            speaker_fallback: true,
        }
    }
}

/// Input handed to each media strategy.
struct MediaInput<'a> {
    text: &'a str,
    options: &'a SplitOptions<'a>,
}

impl ContentSplitter for MediaSplitter {
    fn name(&self) -> &'static str {
        if self.speaker_fallback {
            "audio"
        } else {
            "video"
        }
    }

    fn split(&self, text: &str, options: &SplitOptions<'_>) -> Vec<RawChunk> {
        let mut chain: FallbackChain<MediaInput<'_>, Vec<RawChunk>> =
            FallbackChain::new().then(TimestampStrategy);
        if self.speaker_fallback {
            chain = chain.then(SpeakerStrategy);
        }
        chain = chain.then(ParagraphStrategy);

        let input = MediaInput { text, options };
        chain
            .run(&input)
            .map(|(_, chunks)| chunks)
            .unwrap_or_default()
    }
}

struct TimestampStrategy;

impl<'a> Strategy<MediaInput<'a>> for TimestampStrategy {
    type Output = Vec<RawChunk>;

    fn name(&self) -> &'static str {
        "timestamps"
    }

    fn applicable(&self, input: &MediaInput<'a>) -> bool {
        detect_timestamp_format(input.text) != TimestampFormat::None
    }

    fn apply(&self, input: &MediaInput<'a>) -> Option<Vec<RawChunk>> {
        let extraction = extract_timestamps_from_content(input.text);
        if extraction.segments.is_empty() {
            return None;
        }
        let ts = input.options.timestamps;
        let segments = validate_timestamp_continuity(&extraction.segments);
        let segments = merge_adjacent_segments(&segments, ts.merge_max_gap, ts.merge_max_duration);
        let segments = split_long_segments(&segments, ts.split_max_duration);
        debug!(
            format = extraction.format.as_str(),
            segments = segments.len(),
            coverage = extraction.coverage_percentage,
            "timestamped transcript"
        );

        let chunks =
            create_timestamp_aware_chunks(&segments, input.options.max_tokens, ts.overlap_seconds);
        if chunks.is_empty() {
            None
        } else {
            Some(chunks)
        }
    }
}

struct SpeakerStrategy;

impl<'a> Strategy<MediaInput<'a>> for SpeakerStrategy {
    type Output = Vec<RawChunk>;

    fn name(&self) -> &'static str {
        "speakers"
    }

    fn applicable(&self, _input: &MediaInput<'a>) -> bool {
        true
    }

    fn apply(&self, input: &MediaInput<'a>) -> Option<Vec<RawChunk>> {
        split_by_speakers(input.text, input.options)
    }
}

struct ParagraphStrategy;

impl<'a> Strategy<MediaInput<'a>> for ParagraphStrategy {
    type Output = Vec<RawChunk>;

    fn name(&self) -> &'static str {
        "paragraphs"
    }

    fn applicable(&self, _input: &MediaInput<'a>) -> bool {
        true
    }

    fn apply(&self, input: &MediaInput<'a>) -> Option<Vec<RawChunk>> {
        Some(split_structured(
            input.text,
            0,
            input.text.len(),
            input.options,
        ))
    }
}

/// Render a segment as a `[M:SS] text` line.
fn segment_line(segment: &TimestampedSegment) -> String {
    format!(
        "[{}] {}",
        format_seconds_to_timestamp(segment.start_time),
        segment.text
    )
}

/// Greedily pack segments into chunks of at most `max_tokens` worth of
/// characters (4 per token).
///
/// A segment too long to fit on its own is first split into timed parts
/// that do, so no chunk exceeds the budget.
///
/// Each new chunk is seeded with the trailing segments of the previous one
/// that start within `overlap_seconds` of its end. A seed never repeats a
/// whole chunk and is dropped when it would leave no room for the next
/// segment. Timing metrics for the whole run are attached to the first
/// chunk.
pub fn create_timestamp_aware_chunks(
    segments: &[TimestampedSegment],
    max_tokens: usize,
    overlap_seconds: f64,
) -> Vec<RawChunk> {
    let budget = max_tokens.max(1) * CHARS_PER_TOKEN;
    let bounded = split_oversized_segments(segments, budget);
    let segments = bounded.as_slice();
    let lines: Vec<String> = segments.iter().map(segment_line).collect();

    let mut chunks: Vec<RawChunk> = Vec::new();
    // Indices into `segments` of the chunk being built
    let mut current: Vec<usize> = Vec::new();
    let mut current_len = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let line_len = line.len() + 1;
        if !current.is_empty() && current_len + line_len > budget {
            chunks.push(build_chunk(segments, &lines, &current));

            let seed = overlap_seed(segments, &current, overlap_seconds);
            let seed_len: usize = seed.iter().map(|&j| lines[j].len() + 1).sum();
            if seed_len + line_len > budget {
                current.clear();
                current_len = 0;
            } else {
                current = seed;
                current_len = seed_len;
            }
        }
        current.push(i);
        current_len += line_len;
    }
    if !current.is_empty() {
        chunks.push(build_chunk(segments, &lines, &current));
    }

    if let Some(first) = chunks.first_mut() {
        first.timestamp_metrics = Some(calculate_timestamp_metrics(segments));
    }
    chunks
}

/// Trailing indices of `chunk` whose segments start within
/// `overlap_seconds` of the chunk's end, excluding the chunk's first segment.
fn overlap_seed(
    segments: &[TimestampedSegment],
    chunk: &[usize],
    overlap_seconds: f64,
) -> Vec<usize> {
    if overlap_seconds <= 0.0 || chunk.len() < 2 {
        return Vec::new();
    }
    let end = chunk
        .iter()
        .map(|&j| segments[j].end_time)
        .fold(f64::MIN, f64::max);
    let cutoff = end - overlap_seconds;
    let first_kept = chunk[1..]
        .iter()
        .position(|&j| segments[j].start_time >= cutoff)
        .map(|p| p + 1);
    match first_kept {
        Some(p) => chunk[p..].to_vec(),
        None => Vec::new(),
    }
}

fn build_chunk(segments: &[TimestampedSegment], lines: &[String], indices: &[usize]) -> RawChunk {
    let content = indices
        .iter()
        .map(|&j| lines[j].as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let members: Vec<TimestampedSegment> = indices.iter().map(|&j| segments[j].clone()).collect();
    let spans: Vec<(usize, usize)> = members.iter().filter_map(|s| s.span).collect();
    let start_offset = spans.iter().map(|s| s.0).min().unwrap_or(0);
    let end_offset = spans.iter().map(|s| s.1).max().unwrap_or(start_offset);

    RawChunk {
        content,
        start_offset,
        end_offset,
        timestamp_range: TimestampRange::spanning(&members),
        ..RawChunk::default()
    }
}
