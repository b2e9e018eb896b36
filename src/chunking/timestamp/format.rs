//! Timestamp parsing, formatting and speech-duration estimation.

/// Speaking rate used to estimate durations (150 words per minute).
pub const WORDS_PER_SECOND: f64 = 2.5;

/// Minimum estimated duration for an untimed stretch of speech.
pub const MIN_ESTIMATED_DURATION: f64 = 5.0;

/// Parse `M:SS`, `MM:SS` or `H:MM:SS` (optionally wrapped in brackets or
/// parentheses) into seconds.
///
/// Returns `None` for anything that isn't a well-formed clock value.
pub fn parse_timestamp_to_seconds(raw: &str) -> Option<f64> {
    let trimmed = raw
        .trim()
        .trim_start_matches(['[', '('])
        .trim_end_matches([']', ')'])
        .trim();

    let parts: Vec<&str> = trimmed.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    let numbers: Vec<u64> = parts
        .iter()
        .map(|p| p.parse::<u64>())
        .collect::<Result<_, _>>()
        .ok()?;

    let (hours, minutes, seconds) = match numbers.as_slice() {
        [m, s] => (0, *m, *s),
        [h, m, s] => {
            if *m >= 60 {
                return None;
            }
            (*h, *m, *s)
        }
        _ => return None,
    };
    if seconds >= 60 || parts.last().map(|s| s.len()) != Some(2) {
        return None;
    }

    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    Some(total as f64)
}

/// Format seconds as `M:SS`, or `H:MM:SS` from one hour on.
///
/// Fractional seconds are truncated; negative and non-finite input
/// formats as `0:00`.
pub fn format_seconds_to_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Estimate how long it takes to speak `text` at [`WORDS_PER_SECOND`],
/// never less than [`MIN_ESTIMATED_DURATION`].
pub fn estimate_speech_duration(text: &str) -> f64 {
    let words = text.split_whitespace().count() as f64;
    (words / WORDS_PER_SECOND).max(MIN_ESTIMATED_DURATION)
}
