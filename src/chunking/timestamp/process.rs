//! Segment post-processing: continuity repair, merging, splitting and metrics.
//!
//! All functions take segments by slice and return a fresh `Vec`; input
//! segments are never modified.

use super::format::estimate_speech_duration;
use super::types::{TimestampMetrics, TimestampedSegment, TimestampedWord};
use crate::chunking::text::{ceil_char_boundary, floor_char_boundary, sentence_spans, word_count};

/// Gaps at or below this many seconds are treated as contiguous.
const GAP_EPSILON: f64 = 0.01;

/// Bytes reserved for the `[H:MM:SS] ` label and line break a segment is
/// rendered with inside a chunk.
const LABEL_ALLOWANCE: usize = 16;

/// Repair a segment sequence so it is non-decreasing and non-overlapping.
///
/// A start that precedes the previous end is clamped forward to it; a
/// segment left with `end <= start` is extended by its estimated speaking
/// time. Gaps present in the source are preserved.
pub fn validate_timestamp_continuity(segments: &[TimestampedSegment]) -> Vec<TimestampedSegment> {
    let mut result: Vec<TimestampedSegment> = Vec::with_capacity(segments.len());
    for segment in segments {
        let mut fixed = segment.clone();
        if !fixed.start_time.is_finite() || fixed.start_time < 0.0 {
            fixed.start_time = 0.0;
        }
        if let Some(prev) = result.last() {
            if fixed.start_time < prev.end_time {
                fixed.start_time = prev.end_time;
            }
        }
        if !fixed.end_time.is_finite() || fixed.end_time <= fixed.start_time {
            fixed.end_time = fixed.start_time + estimate_speech_duration(&fixed.text);
        }
        result.push(fixed);
    }
    result
}

/// Merge consecutive segments separated by at most `max_gap` seconds while
/// the merged duration stays within `max_duration`.
///
/// Segments attributed to different speakers are never merged.
pub fn merge_adjacent_segments(
    segments: &[TimestampedSegment],
    max_gap: f64,
    max_duration: f64,
) -> Vec<TimestampedSegment> {
    let mut result: Vec<TimestampedSegment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if let Some(current) = result.last_mut() {
            let gap = segment.start_time - current.end_time;
            let combined = segment.end_time.max(current.end_time) - current.start_time;
            if gap <= max_gap && combined <= max_duration && current.speaker == segment.speaker
            {
                absorb(current, segment);
                continue;
            }
        }
        result.push(segment.clone());
    }
    result
}

fn absorb(current: &mut TimestampedSegment, next: &TimestampedSegment) {
    if current.text.is_empty() {
        current.text = next.text.clone();
    } else if !next.text.is_empty() {
        current.text.push(' ');
        current.text.push_str(&next.text);
    }
    current.end_time = current.end_time.max(next.end_time);
    current.words.extend(next.words.iter().cloned());
    current.confidence = match (current.confidence, next.confidence) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    current.span = match (current.span, next.span) {
        (Some((s, _)), Some((_, e))) => Some((s, e)),
        (a, b) => a.or(b),
    };
}

/// Split every segment longer than `max_duration` into
/// `ceil(duration / max_duration)` parts of equal duration.
///
/// Text is divided at sentence boundaries (falling back to words) so each
/// part carries a similar amount of it. The parts exactly cover the
/// original `[start, end]` envelope. Word timings are assigned to the part
/// whose interval contains the word's start.
pub fn split_long_segments(
    segments: &[TimestampedSegment],
    max_duration: f64,
) -> Vec<TimestampedSegment> {
    let mut result = Vec::with_capacity(segments.len());
    for segment in segments {
        let duration = segment.duration();
        if max_duration <= 0.0 || duration <= max_duration {
            result.push(segment.clone());
            continue;
        }

        let wanted = (duration / max_duration).ceil() as usize;
        let pieces = text_pieces(&segment.text, wanted);
        let parts = pieces.len().max(1);
        let step = duration / parts as f64;

        for (i, text) in pieces.into_iter().enumerate() {
            let start = segment.start_time + step * i as f64;
            let end = if i + 1 == parts {
                segment.end_time
            } else {
                segment.start_time + step * (i + 1) as f64
            };
            let words: Vec<TimestampedWord> = segment
                .words
                .iter()
                .filter(|w| w.start >= start && (w.start < end || i + 1 == parts))
                .cloned()
                .collect();
            result.push(TimestampedSegment {
                text,
                start_time: start,
                end_time: end,
                words,
                speaker: segment.speaker.clone(),
                confidence: segment.confidence,
                span: segment.span,
            });
        }
    }
    result
}

/// Split every segment whose rendered line would exceed `max_bytes` into
/// consecutive parts that fit.
///
/// Text is cut at sentence boundaries, then at word boundaries, and a single
/// word longer than the limit is cut at char boundaries. Each part gets a
/// time sub-range proportional to its share of the text, and the parts
/// exactly cover the original `[start, end]` envelope.
pub fn split_oversized_segments(
    segments: &[TimestampedSegment],
    max_bytes: usize,
) -> Vec<TimestampedSegment> {
    let room = max_bytes.saturating_sub(LABEL_ALLOWANCE).max(1);
    let mut result = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.text.len() <= room {
            result.push(segment.clone());
            continue;
        }

        let pieces = bounded_pieces(&segment.text, room);
        let parts = pieces.len();
        let total: usize = pieces.iter().map(String::len).sum::<usize>().max(1);
        let duration = segment.duration().max(0.0);
        let at = |bytes: usize| segment.start_time + duration * bytes as f64 / total as f64;
        let mut consumed = 0usize;

        for (i, text) in pieces.into_iter().enumerate() {
            let start = at(consumed);
            consumed += text.len();
            let end = if i + 1 == parts {
                segment.end_time
            } else {
                at(consumed)
            };
            let words: Vec<TimestampedWord> = segment
                .words
                .iter()
                .filter(|w| w.start >= start && (w.start < end || i + 1 == parts))
                .cloned()
                .collect();
            result.push(TimestampedSegment {
                text,
                start_time: start,
                end_time: end,
                words,
                speaker: segment.speaker.clone(),
                confidence: segment.confidence,
                span: segment.span,
            });
        }
    }
    result
}

/// Greedily pack sentences (or the words of over-long sentences) into
/// pieces of at most `room` bytes.
fn bounded_pieces(text: &str, room: usize) -> Vec<String> {
    let mut units: Vec<&str> = Vec::new();
    for (s, e) in sentence_spans(text) {
        let sentence = &text[s..e];
        if sentence.len() <= room {
            units.push(sentence);
            continue;
        }
        for word in sentence.split_whitespace() {
            units.extend(hard_cuts(word, room));
        }
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for unit in units {
        if !current.is_empty() && current.len() + 1 + unit.len() > room {
            pieces.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(unit);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Cut `word` into slices of at most `room` bytes on char boundaries.
fn hard_cuts(word: &str, room: usize) -> Vec<&str> {
    let mut cuts = Vec::new();
    let mut rest = word;
    while rest.len() > room {
        let mut cut = floor_char_boundary(rest, room);
        if cut == 0 {
            cut = ceil_char_boundary(rest, 1);
        }
        cuts.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    if !rest.is_empty() {
        cuts.push(rest);
    }
    cuts
}

/// Divide `text` into at most `parts` groups of consecutive sentences with
/// roughly equal word counts. Falls back to word groups when there are fewer
/// sentences than parts.
fn text_pieces(text: &str, parts: usize) -> Vec<String> {
    let sentences: Vec<&str> = sentence_spans(text)
        .into_iter()
        .map(|(s, e)| &text[s..e])
        .collect();
    let units: Vec<&str> = if sentences.len() >= parts {
        sentences
    } else {
        text.split_whitespace().collect()
    };
    if units.is_empty() {
        return vec![String::new(); parts];
    }
    if units.len() <= parts {
        return units.into_iter().map(str::to_string).collect();
    }

    let total_words: usize = units.iter().map(|u| word_count(u).max(1)).sum();
    let target = total_words as f64 / parts as f64;
    let mut pieces: Vec<String> = Vec::with_capacity(parts);
    let mut current: Vec<&str> = Vec::new();
    let mut words_so_far = 0usize;

    for (i, unit) in units.iter().enumerate() {
        current.push(unit);
        words_so_far += word_count(unit).max(1);
        let remaining_units = units.len() - i - 1;
        let remaining_parts = parts - pieces.len() - 1;
        let reached = words_so_far as f64 >= target * (pieces.len() + 1) as f64;
        // Leave at least one unit for each part still to fill
        let must_close = remaining_units == remaining_parts;
        if remaining_parts > 0 && (reached || must_close) {
            pieces.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        pieces.push(current.join(" "));
    }
    pieces
}

/// Summarize timing for a run of segments.
///
/// `total_duration` spans the first start to the last end; coverage is the
/// summed segment duration over that span.
pub fn calculate_timestamp_metrics(segments: &[TimestampedSegment]) -> TimestampMetrics {
    let Some(first) = segments.first() else {
        return TimestampMetrics::default();
    };

    let end = segments.iter().map(|s| s.end_time).fold(first.end_time, f64::max);
    let total_duration = (end - first.start_time).max(0.0);
    let covered: f64 = segments.iter().map(|s| s.duration().max(0.0)).sum();

    let mut gap_count = 0;
    let mut total_gap_duration = 0.0;
    for pair in segments.windows(2) {
        let gap = pair[1].start_time - pair[0].end_time;
        if gap > GAP_EPSILON {
            gap_count += 1;
            total_gap_duration += gap;
        }
    }

    let coverage_percentage = if total_duration > 0.0 {
        (covered / total_duration * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    TimestampMetrics {
        segment_count: segments.len(),
        total_duration,
        average_segment_duration: covered / segments.len() as f64,
        gap_count,
        total_gap_duration,
        coverage_percentage,
    }
}
