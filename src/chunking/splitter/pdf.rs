//! Page-aware splitting for text extracted from PDFs.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::structural::split_structured;
use super::{ContentSplitter, SplitOptions};
use crate::chunking::types::RawChunk;

// Matches: "Page 3", "page 3 of 10", "--- Page 3 ---", or a line holding
// only a number.
static PAGE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?mi)^[ \t]*(?:-{2,}[ \t]*)?page[ \t]+(\d{1,5})(?:[ \t]+of[ \t]+\d{1,5})?(?:[ \t]*-{2,})?[ \t]*\r?$|^[ \t]*(\d{1,4})[ \t]*\r?$",
    )
    .expect("Invalid page marker regex")
});

/// Markers required before the document is treated as paginated.
const MIN_PAGE_MARKERS: usize = 2;

/// A page-break marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker {
    pub page: u32,
    /// Byte range of the marker line
    pub start: usize,
    pub end: usize,
}

/// Find page-break marker lines in document order.
pub fn find_page_markers(text: &str) -> Vec<PageMarker> {
    PAGE_MARKER
        .captures_iter(text)
        .filter_map(|c| {
            let whole = c.get(0)?;
            let number = c.get(1).or_else(|| c.get(2))?;
            let page = number.as_str().parse::<u32>().ok()?;
            Some(PageMarker {
                page,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// PDF splitter: each page is split structurally and labeled with its
/// page number. Documents with fewer than two markers are split as plain
/// structured text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfSplitter;

impl ContentSplitter for PdfSplitter {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn split(&self, text: &str, options: &SplitOptions<'_>) -> Vec<RawChunk> {
        if !options.preserve_structure {
            return split_structured(text, 0, text.len(), options);
        }

        let markers = find_page_markers(text);
        if markers.len() < MIN_PAGE_MARKERS {
            debug!(markers = markers.len(), "no pagination detected");
            return split_structured(text, 0, text.len(), options);
        }
        debug!(pages = markers.len(), "splitting by page markers");

        let mut chunks = Vec::new();
        // Text before the first marker has no page label
        chunks.extend(split_structured(text, 0, markers[0].start, options));

        for (i, marker) in markers.iter().enumerate() {
            let page_end = markers.get(i + 1).map_or(text.len(), |next| next.start);
            chunks.extend(
                split_structured(text, marker.end, page_end, options)
                    .into_iter()
                    .map(|chunk| chunk.with_page(Some(marker.page))),
            );
        }
        chunks
    }
}
