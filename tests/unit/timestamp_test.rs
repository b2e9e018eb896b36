//! Unit tests for timestamp extraction and segment processing

use ctxsmith::chunking::timestamp::{
    calculate_timestamp_metrics, detect_timestamp_format, extract_timestamps_from_content,
    format_seconds_to_timestamp, merge_adjacent_segments, parse_timestamp_to_seconds,
    split_long_segments, validate_timestamp_continuity, TimestampFormat, TimestampedSegment,
};

use crate::helpers::load_fixture;

#[test]
fn lecture_fixture_is_bracketed() {
    let lecture = load_fixture("lecture.txt");
    assert_eq!(detect_timestamp_format(&lecture), TimestampFormat::Bracketed);

    let extraction = extract_timestamps_from_content(&lecture);
    assert!(extraction.has_timestamps);
    assert_eq!(extraction.format, TimestampFormat::Bracketed);

    let starts: Vec<f64> = extraction.segments.iter().map(|s| s.start_time).collect();
    assert_eq!(starts, vec![0.0, 45.0, 90.0, 140.0, 185.0, 250.0]);
    // Last segment runs for its estimated speaking time (12 words, 5 s minimum)
    assert_eq!(extraction.segments[5].end_time, 255.0);
    assert_eq!(extraction.total_duration, 255.0);
    assert_eq!(extraction.coverage_percentage, 100.0);

    let first = &extraction.segments[0];
    assert!(first.text.starts_with("Welcome to this lecture"));
    assert!(!first.text.contains('['));
}

#[test]
fn segment_ends_meet_next_start() {
    let extraction = extract_timestamps_from_content(&load_fixture("lecture.txt"));
    for pair in extraction.segments.windows(2) {
        assert_eq!(pair[0].end_time, pair[1].start_time);
    }
}

#[test]
fn plain_prose_has_no_timestamps() {
    let extraction = extract_timestamps_from_content("Nothing timed here. Meet at noon.");
    assert!(!extraction.has_timestamps);
    assert_eq!(extraction.format, TimestampFormat::None);
    assert!(extraction.segments.is_empty());
    assert_eq!(extraction.coverage_percentage, 0.0);
}

#[test]
fn long_segments_are_split_to_the_limit() {
    let extraction = extract_timestamps_from_content(&load_fixture("lecture.txt"));
    let split = split_long_segments(&extraction.segments, 60.0);
    // Only 3:05-4:10 (65 s) exceeds a minute
    assert_eq!(split.len(), 7);
    for segment in &split {
        assert!(segment.duration() <= 60.0 + 1e-9);
    }
    assert_eq!(split.last().map(|s| s.end_time), Some(255.0));
}

#[test]
fn merging_respects_duration_cap() {
    let segments = vec![
        TimestampedSegment::new("one", 0.0, 10.0),
        TimestampedSegment::new("two", 10.5, 20.0),
        TimestampedSegment::new("three", 20.0, 50.0),
    ];
    let merged = merge_adjacent_segments(&segments, 2.0, 30.0);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].text, "one two");
    assert_eq!((merged[0].start_time, merged[0].end_time), (0.0, 20.0));
    assert_eq!(merged[1].text, "three");
}

#[test]
fn continuity_repairs_overlaps_and_inversions() {
    let segments = vec![
        TimestampedSegment::new("a", -3.0, 10.0),
        TimestampedSegment::new("b", 8.0, 20.0),
        TimestampedSegment::new("c", 30.0, 25.0),
    ];
    let fixed = validate_timestamp_continuity(&segments);
    assert_eq!(fixed[0].start_time, 0.0);
    assert_eq!(fixed[1].start_time, 10.0);
    assert!(fixed[2].end_time > fixed[2].start_time);
    for pair in fixed.windows(2) {
        assert!(pair[1].start_time >= pair[0].end_time);
    }
}

#[test]
fn metrics_count_gaps() {
    let segments = vec![
        TimestampedSegment::new("a", 0.0, 10.0),
        TimestampedSegment::new("b", 15.0, 25.0),
    ];
    let metrics = calculate_timestamp_metrics(&segments);
    assert_eq!(metrics.segment_count, 2);
    assert_eq!(metrics.gap_count, 1);
    assert_eq!(metrics.total_gap_duration, 5.0);
    assert_eq!(metrics.total_duration, 25.0);
    assert_eq!(metrics.average_segment_duration, 10.0);
    assert_eq!(metrics.coverage_percentage, 80.0);
}

#[test]
fn clock_parsing_and_formatting_agree() {
    for raw in ["0:00", "4:15", "59:59", "1:00:00", "2:03:04"] {
        let seconds = parse_timestamp_to_seconds(raw).unwrap();
        assert_eq!(format_seconds_to_timestamp(seconds), raw);
    }
    assert_eq!(parse_timestamp_to_seconds("1:75"), None);
    assert_eq!(parse_timestamp_to_seconds("abc"), None);
}
