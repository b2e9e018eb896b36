//! Unit tests for the chapter prompt and response boundary

use ctxsmith::{
    build_chapter_prompt, chunk_content, parse_chapters, ChapterError, ChapterHints,
    ChunkingOptions, ContentType,
};

use crate::helpers::load_fixture;

#[test]
fn fixture_response_is_validated_and_sorted() {
    let response = load_fixture("chapters_response.txt");
    let hints = ChapterHints {
        page_count: None,
        duration_seconds: Some(255.0),
    };
    let chapters = parse_chapters(&response, &hints).unwrap();

    let titles: Vec<&str> = chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Introduction", "Borrowing", "Lifetimes"]);
    let ids: Vec<&str> = chapters.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["chapter-1", "chapter-2", "chapter-3"]);

    assert_eq!(chapters[0].start_time, Some(0.0));
    assert_eq!(chapters[0].end_timestamp.as_deref(), Some("1:30"));
    assert_eq!(chapters[1].start_time, Some(90.0));
    assert_eq!(chapters[1].end_time, Some(185.0));
    assert_eq!(chapters[2].start_timestamp.as_deref(), Some("3:05"));
    assert_eq!(chapters[2].end_time, None);
}

#[test]
fn prompt_for_chunked_lecture() {
    let lecture = load_fixture("lecture.txt");
    let chunked = chunk_content(&lecture, ContentType::Youtube, &ChunkingOptions::default());
    let hints = ChapterHints {
        page_count: None,
        duration_seconds: Some(255.0),
    };
    let prompt = build_chapter_prompt(&chunked, ContentType::Youtube, &hints, 8000);
    assert!(prompt.system.contains("startTime"));
    assert!(prompt.user.starts_with("Split this YouTube video into chapters."));
    assert!(prompt.user.contains("The recording is 4:15 long."));
    assert!(prompt.user.contains("[0:00] Welcome to this lecture"));
    assert!(!prompt.user.contains("Overview:"));
}

#[test]
fn prompt_for_paper_names_page_range() {
    let paper = load_fixture("paper.txt");
    let chunked = chunk_content(&paper, ContentType::Pdf, &ChunkingOptions::default());
    let hints = ChapterHints {
        page_count: Some(3),
        duration_seconds: None,
    };
    let prompt = build_chapter_prompt(&chunked, ContentType::Pdf, &hints, 8000);
    assert!(prompt
        .user
        .contains("Give startPage and endPage for every chapter, between 1 and 3."));
    let abstract_at = prompt.user.find("ABSTRACT").unwrap();
    let method_at = prompt.user.find("2. METHOD").unwrap();
    assert!(abstract_at < method_at);
}

#[test]
fn prose_without_json_is_an_error() {
    let err = parse_chapters("I could not find any chapters.", &ChapterHints::default())
        .unwrap_err();
    assert!(matches!(err, ChapterError::JsonExtraction { .. }));
}

#[test]
fn only_untitled_chapters_is_an_error() {
    let err = parse_chapters(r#"[{"title": "  "}]"#, &ChapterHints::default()).unwrap_err();
    assert!(matches!(err, ChapterError::NoChapters));
}
