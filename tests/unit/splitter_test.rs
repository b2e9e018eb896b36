//! Unit tests for the content-type splitters, driven through the chunker

use ctxsmith::chunking::splitter::{find_page_markers, find_speaker_turns, normalize_html};
use ctxsmith::{ChunkingOptions, ContentChunker, ContentType};

use crate::helpers::{load_fixture, small_chunks};

#[test]
fn pdf_chunks_carry_page_numbers() {
    let paper = load_fixture("paper.txt");
    let pages: Vec<u32> = find_page_markers(&paper).iter().map(|m| m.page).collect();
    assert_eq!(pages, vec![1, 2, 3]);

    let chunked = ContentChunker::default().chunk_content(&paper, ContentType::Pdf);
    let labels: Vec<Option<u32>> = chunked
        .chunks
        .iter()
        .map(|c| c.metadata.page_number)
        .collect();
    assert_eq!(labels, vec![None, Some(1), Some(2), Some(3)]);
    assert_eq!(chunked.chunks[0].body(), "Efficient Chunking for Retrieval");
    assert!(chunked.chunks[1].body().starts_with("ABSTRACT"));
    assert!(chunked.chunks[1].metadata.has_headings);
    for chunk in &chunked.chunks {
        assert!(!chunk.body().contains("Page "));
        assert_eq!(&paper[chunk.start_offset..chunk.end_offset], chunk.body());
    }
}

#[test]
fn pdf_without_structure_ignores_pages() {
    let paper = load_fixture("paper.txt");
    let options = ChunkingOptions {
        preserve_structure: false,
        ..ChunkingOptions::default()
    };
    let chunked = ContentChunker::new(options).chunk_content(&paper, ContentType::Pdf);
    assert!(chunked.chunks.iter().all(|c| c.metadata.page_number.is_none()));
}

#[test]
fn video_chunks_follow_timestamps() {
    let lecture = load_fixture("lecture.txt");
    let chunked = ContentChunker::new(small_chunks(50, 10)).chunk_content(&lecture, ContentType::Youtube);
    assert!(chunked.chunks.len() > 1);

    let mut previous_start = -1.0;
    for (i, chunk) in chunked.chunks.iter().enumerate() {
        assert_eq!(chunk.id, format!("youtube-chunk-{}", i));
        assert_eq!(chunk.overlap_len, 0);
        assert!(chunk.content.starts_with('['));
        let range = chunk.timestamp_range.as_ref().expect("timed chunk");
        assert!(range.start_seconds >= previous_start);
        assert!(range.end_seconds > range.start_seconds);
        previous_start = range.start_seconds;
        assert_eq!(chunk.metadata.timestamp_metrics.is_some(), i == 0);
    }

    let first = chunked.chunks[0].timestamp_range.as_ref().unwrap();
    assert_eq!(first.start_timestamp, "0:00");
    let last = chunked.chunks.last().unwrap().timestamp_range.as_ref().unwrap();
    assert_eq!(last.end_timestamp, "4:15");
}

#[test]
fn video_fits_in_one_chunk_with_default_budget() {
    let lecture = load_fixture("lecture.txt");
    let chunked = ContentChunker::default().chunk_content(&lecture, ContentType::Video);
    assert_eq!(chunked.chunks.len(), 1);
    let range = chunked.chunks[0].timestamp_range.as_ref().unwrap();
    assert_eq!(range.label(), "0:00-4:15");
    assert!(chunked.chunks[0].content.contains("[4:10] To summarize"));
}

#[test]
fn untimed_audio_splits_by_speaker() {
    let transcript = load_fixture("transcript.txt");
    let turns = find_speaker_turns(&transcript);
    let names: Vec<&str> = turns.iter().map(|t| t.speaker.as_str()).collect();
    assert_eq!(names, vec!["Interviewer", "Dana Smith", "Interviewer", "Dana Smith"]);

    let chunked = ContentChunker::default().chunk_content(&transcript, ContentType::Audio);
    assert_eq!(chunked.chunks.len(), 1);
    assert_eq!(
        chunked.chunks[0].metadata.speakers,
        vec!["Interviewer".to_string(), "Dana Smith".to_string()]
    );
    assert!(chunked.chunks[0].timestamp_range.is_none());
}

#[test]
fn untimed_video_falls_back_to_paragraphs() {
    let transcript = load_fixture("transcript.txt");
    let chunked = ContentChunker::default().chunk_content(&transcript, ContentType::Video);
    assert_eq!(chunked.chunks.len(), 1);
    assert!(chunked.chunks[0].metadata.speakers.is_empty());
    assert!(chunked.chunks[0].timestamp_range.is_none());
}

#[test]
fn website_is_normalized_and_split_by_section() {
    let html = load_fixture("page.html");
    let text = normalize_html(&html);
    assert!(!text.contains('<'));
    assert!(!text.contains("analytics"));
    assert!(!text.contains("margin"));
    assert!(text.contains("# Choosing a cache"));
    assert!(text.contains("- Fast lookups\n- Bounded memory"));

    let chunked = ContentChunker::default().chunk_content(&html, ContentType::Website);
    assert_eq!(chunked.chunks.len(), 3);
    assert_eq!(chunked.chunks[0].body(), "Cache Guide \u{2013} Docs");
    assert!(chunked.chunks[1].metadata.has_headings);
    assert!(chunked.chunks[1].metadata.has_lists);
    assert!(chunked.chunks[2].body().starts_with("## Eviction policies"));
    assert!(chunked.chunks[2].relevance_score > chunked.chunks[0].relevance_score);
    for chunk in &chunked.chunks {
        assert_eq!(&text[chunk.start_offset..chunk.end_offset], chunk.body());
    }
}
