//! Timestamp detection and segment extraction.
//!
//! Detection order is bracketed, then parenthetical, then bare inline; the
//! first notation that yields segments wins and formats are never mixed
//! within one document.

use once_cell::sync::Lazy;
use regex::Regex;

use super::format::{estimate_speech_duration, parse_timestamp_to_seconds};
use super::types::{TimestampExtraction, TimestampFormat, TimestampedSegment};
use crate::chunking::strategy::{FallbackChain, Strategy};
use crate::chunking::text::trim_span;

static BRACKETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[((?:\d{1,2}:)?\d{1,2}:\d{2})\]").expect("Invalid bracketed timestamp regex")
});

static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(((?:\d{1,2}:)?\d{1,2}:\d{2})\)").expect("Invalid parenthetical timestamp regex")
});

static INLINE_ANY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,2}:)?\d{1,2}:\d{2}\b").expect("Invalid inline timestamp regex")
});

static INLINE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*((?:\d{1,2}:)?\d{1,2}:\d{2})\b[ \t]*(?:[-|:\u{2013}\u{2014}][ \t]*)?")
        .expect("Invalid inline line regex")
});

/// Bare timestamps needed before inline notation is trusted.
const MIN_INLINE_OCCURRENCES: usize = 3;

/// A timestamp boundary before end times are known.
struct Boundary {
    start: f64,
    text: String,
    span: Option<(usize, usize)>,
}

/// Scan `text` for timestamps and convert them into segments.
pub fn extract_timestamps_from_content(text: &str) -> TimestampExtraction {
    let chain: FallbackChain<str, (TimestampFormat, Vec<TimestampedSegment>)> =
        FallbackChain::new()
            .then(MarkerStrategy::bracketed())
            .then(MarkerStrategy::parenthetical())
            .then(InlineStrategy);

    match chain.run(text) {
        Some((_, (format, segments))) => {
            let (total_duration, coverage_percentage) = coverage(&segments);
            TimestampExtraction {
                has_timestamps: true,
                format,
                segments,
                total_duration,
                coverage_percentage,
            }
        }
        None => TimestampExtraction::none(),
    }
}

/// Detect which notation a document uses without building segments.
pub fn detect_timestamp_format(text: &str) -> TimestampFormat {
    if has_marker(text, &BRACKETED) {
        TimestampFormat::Bracketed
    } else if has_marker(text, &PARENTHETICAL) {
        TimestampFormat::Parenthetical
    } else if inline_applicable(text) {
        TimestampFormat::Inline
    } else {
        TimestampFormat::None
    }
}

/// Total duration from time 0 to the last segment end, and the share of it
/// covered by segments, clamped to 0..=100.
fn coverage(segments: &[TimestampedSegment]) -> (f64, f64) {
    let total = segments.iter().map(|s| s.end_time).fold(0.0, f64::max);
    if total <= 0.0 {
        return (0.0, 0.0);
    }
    let covered: f64 = segments
        .iter()
        .map(|s| (s.end_time.min(total) - s.start_time.max(0.0)).max(0.0))
        .sum();
    (total, (covered / total * 100.0).clamp(0.0, 100.0))
}

fn has_marker(text: &str, pattern: &Regex) -> bool {
    pattern
        .captures_iter(text)
        .any(|c| parse_timestamp_to_seconds(&c[1]).is_some())
}

fn inline_applicable(text: &str) -> bool {
    INLINE_ANY.find_iter(text).count() >= MIN_INLINE_OCCURRENCES
        && text.lines().any(|line| INLINE_LINE.is_match(line))
}

/// Turn boundaries into segments: each ends where the next begins; the last
/// ends after its estimated speaking time. Boundaries without text only
/// bound their predecessor.
fn finalize(boundaries: Vec<Boundary>) -> Vec<TimestampedSegment> {
    let mut segments = Vec::with_capacity(boundaries.len());
    for (i, boundary) in boundaries.iter().enumerate() {
        if boundary.text.trim().is_empty() {
            continue;
        }
        let end_time = match boundaries.get(i + 1) {
            Some(next) => next.start,
            None => boundary.start + estimate_speech_duration(&boundary.text),
        };
        let mut segment = TimestampedSegment::new(boundary.text.clone(), boundary.start, end_time);
        segment.span = boundary.span;
        segments.push(segment);
    }
    segments
}

/// Bracketed or parenthetical markers: each marks the start of a segment
/// whose text runs to the next marker.
struct MarkerStrategy {
    format: TimestampFormat,
    pattern: &'static Lazy<Regex>,
}

impl MarkerStrategy {
    fn bracketed() -> Self {
        Self {
            format: TimestampFormat::Bracketed,
            pattern: &BRACKETED,
        }
    }

    fn parenthetical() -> Self {
        Self {
            format: TimestampFormat::Parenthetical,
            pattern: &PARENTHETICAL,
        }
    }
}

impl Strategy<str> for MarkerStrategy {
    type Output = (TimestampFormat, Vec<TimestampedSegment>);

    fn name(&self) -> &'static str {
        self.format.as_str()
    }

    fn applicable(&self, text: &str) -> bool {
        has_marker(text, self.pattern)
    }

    fn apply(&self, text: &str) -> Option<Self::Output> {
        let markers: Vec<(f64, usize, usize)> = self
            .pattern
            .captures_iter(text)
            .filter_map(|c| {
                let whole = c.get(0)?;
                let seconds = parse_timestamp_to_seconds(&c[1])?;
                Some((seconds, whole.start(), whole.end()))
            })
            .collect();

        let preamble = markers
            .first()
            .and_then(|&(_, start, _)| trim_span(text, 0, start));

        let mut boundaries = Vec::with_capacity(markers.len());
        for (i, &(seconds, _, body_start)) in markers.iter().enumerate() {
            let body_end = markers.get(i + 1).map_or(text.len(), |m| m.1);
            let mut span = trim_span(text, body_start, body_end);
            let mut body = span.map_or(String::new(), |(s, e)| text[s..e].to_string());

            // Untimed text ahead of the first marker rides along with it
            if i == 0 {
                if let Some((ps, pe)) = preamble {
                    body = if body.is_empty() {
                        text[ps..pe].to_string()
                    } else {
                        format!("{} {}", &text[ps..pe], body)
                    };
                    span = Some((ps, span.map_or(pe, |(_, e)| e)));
                }
            }

            boundaries.push(Boundary {
                start: seconds,
                text: body,
                span,
            });
        }

        let segments = finalize(boundaries);
        if segments.is_empty() {
            None
        } else {
            Some((self.format, segments))
        }
    }
}

/// Bare `M:SS` timestamps at the start of lines; continuation lines are
/// appended to the open segment.
struct InlineStrategy;

impl Strategy<str> for InlineStrategy {
    type Output = (TimestampFormat, Vec<TimestampedSegment>);

    fn name(&self) -> &'static str {
        TimestampFormat::Inline.as_str()
    }

    fn applicable(&self, text: &str) -> bool {
        inline_applicable(text)
    }

    fn apply(&self, text: &str) -> Option<Self::Output> {
        let mut boundaries: Vec<Boundary> = Vec::new();
        let mut lines: Vec<&str> = Vec::new();
        let mut span: Option<(usize, usize)> = None;
        let mut preamble: Vec<&str> = Vec::new();
        let mut current_start: Option<f64> = None;
        let mut offset = 0;

        for raw_line in text.split_inclusive('\n') {
            let line_start = offset;
            offset += raw_line.len();
            let line = raw_line.trim_end_matches(['\n', '\r']);

            let timestamp = INLINE_LINE.captures(line).and_then(|c| {
                let seconds = parse_timestamp_to_seconds(&c[1])?;
                Some((seconds, c.get(0)?.end()))
            });

            match timestamp {
                Some((seconds, rest_at)) => {
                    if let Some(start) = current_start.take() {
                        boundaries.push(Boundary {
                            start,
                            text: lines.join("\n"),
                            span: span.take(),
                        });
                        lines.clear();
                    } else if !preamble.is_empty() {
                        lines.append(&mut preamble);
                    }
                    current_start = Some(seconds);
                    if let Some(s) = trim_span(line, rest_at, line.len()) {
                        lines.push(&line[s.0..s.1]);
                        let abs = (line_start + s.0, line_start + s.1);
                        span = Some(span.map_or(abs, |(a, _)| (a, abs.1)));
                    }
                }
                None => {
                    let Some(s) = trim_span(line, 0, line.len()) else {
                        continue;
                    };
                    let abs = (line_start + s.0, line_start + s.1);
                    if current_start.is_some() {
                        lines.push(&line[s.0..s.1]);
                        span = Some(span.map_or(abs, |(a, _)| (a, abs.1)));
                    } else {
                        preamble.push(&line[s.0..s.1]);
                        span = Some(span.map_or(abs, |(a, _)| (a, abs.1)));
                    }
                }
            }
        }

        if let Some(start) = current_start {
            boundaries.push(Boundary {
                start,
                text: lines.join("\n"),
                span,
            });
        }

        let segments = finalize(boundaries);
        if segments.is_empty() {
            None
        } else {
            Some((TimestampFormat::Inline, segments))
        }
    }
}
