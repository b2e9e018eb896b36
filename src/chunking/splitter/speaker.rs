//! Speaker-turn detection for untimed transcripts.

use once_cell::sync::Lazy;
use regex::Regex;

use super::structural::split_structured;
use super::SplitOptions;
use crate::chunking::types::RawChunk;

// Matches: "Speaker 2:", "Interviewer:", "Dr. Jane Smith:" at the start of
// a line. Names are up to three capitalized words.
static SPEAKER_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(Speaker[ \t]+\d+|[A-Z][\w'.\-]*(?:[ \t]+[A-Z][\w'.\-]*){0,2})[ \t]*:[ \t]*",
    )
    .expect("Invalid speaker label regex")
});

/// Turns required before a transcript is treated as diarized.
pub const MIN_SPEAKER_TURNS: usize = 2;

/// One speaker turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerTurn {
    pub speaker: String,
    /// Byte range of the turn including its label
    pub start: usize,
    pub end: usize,
}

/// Find speaker turns in document order. Text before the first label is
/// not part of any turn.
pub fn find_speaker_turns(text: &str) -> Vec<SpeakerTurn> {
    let labels: Vec<(String, usize)> = SPEAKER_LABEL
        .captures_iter(text)
        .filter_map(|c| {
            let whole = c.get(0)?;
            let indent = whole.as_str().len() - whole.as_str().trim_start().len();
            let start = whole.start() + indent;
            Some((c[1].trim().to_string(), start))
        })
        .collect();

    labels
        .iter()
        .enumerate()
        .map(|(i, (speaker, start))| {
            let end = labels.get(i + 1).map_or(text.len(), |next| next.1);
            let end = *start + text[*start..end].trim_end().len();
            SpeakerTurn {
                speaker: speaker.clone(),
                start: *start,
                end,
            }
        })
        .collect()
}

/// Group speaker turns into chunks of at most `options.max_tokens`.
///
/// Returns `None` when fewer than [`MIN_SPEAKER_TURNS`] turns are found.
/// A single turn over budget is split structurally on its own.
pub fn split_by_speakers(text: &str, options: &SplitOptions<'_>) -> Option<Vec<RawChunk>> {
    let turns = find_speaker_turns(text);
    if turns.len() < MIN_SPEAKER_TURNS {
        return None;
    }

    let budget = options.max_tokens.max(1);
    let mut chunks = Vec::new();
    let mut group: Vec<&SpeakerTurn> = Vec::new();
    let mut group_tokens = 0;

    // Untimed preamble before the first label
    if let Some(first) = turns.first() {
        chunks.extend(split_structured(text, 0, first.start, options));
    }

    for turn in &turns {
        let tokens = options.estimator.estimate_tokens(&text[turn.start..turn.end]);
        if tokens > budget {
            flush_group(text, &mut group, &mut chunks);
            group_tokens = 0;
            chunks.extend(
                split_structured(text, turn.start, turn.end, options)
                    .into_iter()
                    .map(|mut chunk| {
                        chunk.speakers = vec![turn.speaker.clone()];
                        chunk
                    }),
            );
            continue;
        }
        if !group.is_empty() && group_tokens + tokens > budget {
            flush_group(text, &mut group, &mut chunks);
            group_tokens = 0;
        }
        group.push(turn);
        group_tokens += tokens;
    }
    flush_group(text, &mut group, &mut chunks);

    Some(chunks)
}

fn flush_group(text: &str, group: &mut Vec<&SpeakerTurn>, chunks: &mut Vec<RawChunk>) {
    if let (Some(first), Some(last)) = (group.first(), group.last()) {
        let mut chunk = RawChunk::from_span(text, first.start, last.end);
        chunk.speakers = distinct_speakers(group.iter().map(|t| t.speaker.as_str()));
        chunks.push(chunk);
    }
    group.clear();
}

fn distinct_speakers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}
