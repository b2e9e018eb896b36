//! Timestamp preservation for timed media content.
//!
//! Extraction turns timestamp notation in transcripts into segments;
//! processing repairs, merges and splits those segments before the media
//! splitter groups them into chunks.

mod extract;
mod format;
mod process;
mod types;

pub use extract::{detect_timestamp_format, extract_timestamps_from_content};
pub use format::{
    estimate_speech_duration, format_seconds_to_timestamp, parse_timestamp_to_seconds,
    MIN_ESTIMATED_DURATION, WORDS_PER_SECOND,
};
pub use process::{
    calculate_timestamp_metrics, merge_adjacent_segments, split_long_segments,
    split_oversized_segments, validate_timestamp_continuity,
};
pub use types::{
    TimestampExtraction, TimestampFormat, TimestampMetrics, TimestampRange, TimestampedSegment,
    TimestampedWord,
};
