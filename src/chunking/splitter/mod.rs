//! Content-type-aware splitters.
//!
//! Each splitter turns source text into ordered [`RawChunk`] candidates.
//! Splitters never fail: malformed input degrades to paragraph and
//! sentence splitting.
//!
//! | Content type          | Splitter            | Strategy                              |
//! |-----------------------|---------------------|---------------------------------------|
//! | text                  | [`StructuralSplitter`] | paragraphs, headings, sentences    |
//! | pdf                   | [`PdfSplitter`]     | page markers, then structural         |
//! | youtube, video        | [`MediaSplitter`]   | timestamps, then paragraphs           |
//! | audio                 | [`MediaSplitter`]   | timestamps, speakers, then paragraphs |
//! | website               | [`WebsiteSplitter`] | HTML sections, then structural        |

use std::borrow::Cow;

use super::config::TimestampOptions;
use super::tokens::TokenEstimator;
use super::types::{ContentType, RawChunk};

mod media;
mod overlap;
mod pdf;
mod speaker;
mod structural;
mod website;

pub use media::{create_timestamp_aware_chunks, MediaSplitter};
pub use overlap::add_overlap;
pub use pdf::{find_page_markers, PdfSplitter};
pub use speaker::{find_speaker_turns, SpeakerTurn};
pub use structural::{split_structured, StructuralSplitter};
pub use website::{normalize_html, WebsiteSplitter};

/// Parameters shared by all splitters for one pass.
#[derive(Debug, Clone, Copy)]
pub struct SplitOptions<'a> {
    /// Token budget per chunk
    pub max_tokens: usize,
    pub preserve_structure: bool,
    pub timestamps: &'a TimestampOptions,
    pub estimator: &'a TokenEstimator,
}

/// A strategy for cutting one kind of content into chunk candidates.
pub trait ContentSplitter: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Convert raw input into the text that is split. Chunk offsets refer
    /// to the returned text.
    fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        Cow::Borrowed(text)
    }

    /// Split prepared text into ordered chunk candidates.
    fn split(&self, text: &str, options: &SplitOptions<'_>) -> Vec<RawChunk>;
}

/// Select the splitter for a content type.
pub fn splitter_for(content_type: ContentType) -> Box<dyn ContentSplitter> {
    match content_type {
        ContentType::Text => Box::new(StructuralSplitter),
        ContentType::Pdf => Box::new(PdfSplitter),
        ContentType::Youtube | ContentType::Video => Box::new(MediaSplitter::video()),
        ContentType::Audio => Box::new(MediaSplitter::audio()),
        ContentType::Website => Box::new(WebsiteSplitter),
    }
}
