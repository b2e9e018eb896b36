//! Chapter prompt construction.

use serde::{Deserialize, Serialize};

use crate::chunking::config::{ChunkingOptions, ContextOptions};
use crate::chunking::context::select_chunks_for_context;
use crate::chunking::timestamp::format_seconds_to_timestamp;
use crate::chunking::types::{ChunkedContent, ContentType};

const SYSTEM_TEMPLATE: &str = include_str!("prompts/system.txt");
const USER_TEMPLATE: &str = include_str!("prompts/user.txt");

/// Read-only metadata about the source, known before chunking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterHints {
    pub page_count: Option<u32>,
    pub duration_seconds: Option<f64>,
}

/// System/user prompt pair for chapter generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterPrompt {
    pub system: String,
    pub user: String,
}

/// Build the chapter prompt for a chunked document.
///
/// The content section holds at most `budget_tokens` of chunk text in
/// document order.
pub fn build_chapter_prompt(
    chunked: &ChunkedContent,
    content_type: ContentType,
    hints: &ChapterHints,
    budget_tokens: usize,
) -> ChapterPrompt {
    // Summary and topics have their own slots in the template
    let options = ChunkingOptions {
        prioritize_relevance: false,
        context: ContextOptions {
            include_overview: false,
            ..ContextOptions::default()
        },
        ..ChunkingOptions::default()
    };
    let content = select_chunks_for_context(chunked, budget_tokens, &options);

    let key_topics = if chunked.key_topics.is_empty() {
        "none".to_string()
    } else {
        chunked.key_topics.join(", ")
    };

    let user = USER_TEMPLATE
        .replace("{content_label}", content_type.label())
        .replace("{position_hint}", &position_hint(content_type, hints))
        .replace("{summary}", chunked.summary.trim())
        .replace("{key_topics}", &key_topics)
        .replace("{content}", &content);

    ChapterPrompt {
        system: SYSTEM_TEMPLATE.trim_end().to_string(),
        user: user.trim_end().to_string(),
    }
}

fn position_hint(content_type: ContentType, hints: &ChapterHints) -> String {
    match content_type {
        ContentType::Pdf => match hints.page_count {
            Some(pages) => format!(
                "The document has {} pages. Give startPage and endPage for every chapter, between 1 and {}.",
                pages, pages
            ),
            None => "Give startPage and endPage for every chapter using the page markers in the content."
                .to_string(),
        },
        ct if ct.is_media() => match hints.duration_seconds {
            Some(duration) => format!(
                "The recording is {} long. Give startTime and endTime in seconds for every chapter, using the [M:SS] markers in the content.",
                format_seconds_to_timestamp(duration)
            ),
            None => "Give startTime and endTime in seconds for every chapter, using the [M:SS] markers in the content."
                .to_string(),
        },
        _ => "Give only a title and summary for every chapter.".to_string(),
    }
}
