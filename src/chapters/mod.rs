//! Chapter generation boundary.
//!
//! Builds the prompt pair a language model needs to split a chunked
//! document into chapters, and parses the model's answer back into
//! validated [`Chapter`]s. Sending the request is left to the caller.

mod prompt;
mod response;

pub use prompt::{build_chapter_prompt, ChapterHints, ChapterPrompt};
pub use response::{parse_chapters, Chapter, ChapterError};
