//! Data structures for timed media content.

use serde::{Deserialize, Serialize};

use super::format::format_seconds_to_timestamp;

/// A single transcribed word with timing, as produced by a transcription service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedWord {
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A `(text, start, end)` unit of timed media content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedSegment {
    pub text: String,
    /// Start time in seconds from the beginning of the recording
    pub start_time: f64,
    /// End time in seconds
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<TimestampedWord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Byte range in the source text this segment was extracted from
    #[serde(skip)]
    pub span: Option<(usize, usize)>,
}

impl TimestampedSegment {
    /// Create a segment with no words, speaker or source span.
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time,
            words: Vec::new(),
            speaker: None,
            confidence: None,
            span: None,
        }
    }

    /// Duration of this segment (may be negative before validation).
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Read-only timing view of this segment.
    pub fn range(&self) -> TimestampRange {
        TimestampRange::new(self.start_time, self.end_time)
    }
}

/// Derived, read-only view of a time interval.
///
/// Always computed from segment or chunk bounds, never stored on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampRange {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub duration: f64,
}

impl TimestampRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start_seconds: start,
            end_seconds: end,
            start_timestamp: format_seconds_to_timestamp(start),
            end_timestamp: format_seconds_to_timestamp(end),
            duration: (end - start).max(0.0),
        }
    }

    /// Envelope of a non-empty run of segments.
    pub fn spanning(segments: &[TimestampedSegment]) -> Option<Self> {
        let first = segments.first()?;
        let end = segments
            .iter()
            .map(|s| s.end_time)
            .fold(first.end_time, f64::max);
        Some(Self::new(first.start_time, end))
    }

    /// Check if a time falls within this range (start inclusive, end exclusive).
    pub fn contains(&self, seconds: f64) -> bool {
        seconds >= self.start_seconds && seconds < self.end_seconds
    }

    /// Human-readable `M:SS-M:SS` label.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_timestamp, self.end_timestamp)
    }
}

/// Timestamp notation detected in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// `[H:MM:SS]` / `[M:SS]`
    Bracketed,
    /// `(H:MM:SS)` / `(M:SS)`
    Parenthetical,
    /// Bare `M:SS` at the start of lines
    Inline,
    None,
}

impl TimestampFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampFormat::Bracketed => "bracketed",
            TimestampFormat::Parenthetical => "parenthetical",
            TimestampFormat::Inline => "inline",
            TimestampFormat::None => "none",
        }
    }
}

/// Result of scanning a document for timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampExtraction {
    pub has_timestamps: bool,
    pub format: TimestampFormat,
    pub segments: Vec<TimestampedSegment>,
    /// Recording length covered by the timestamps, measured from 0
    pub total_duration: f64,
    /// Share of `total_duration` covered by segments (0 - 100)
    pub coverage_percentage: f64,
}

impl TimestampExtraction {
    pub fn none() -> Self {
        Self {
            has_timestamps: false,
            format: TimestampFormat::None,
            segments: Vec::new(),
            total_duration: 0.0,
            coverage_percentage: 0.0,
        }
    }
}

/// Aggregate timing diagnostics for a run of segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampMetrics {
    pub segment_count: usize,
    /// First start to last end
    pub total_duration: f64,
    pub average_segment_duration: f64,
    pub gap_count: usize,
    pub total_gap_duration: f64,
    pub coverage_percentage: f64,
}
