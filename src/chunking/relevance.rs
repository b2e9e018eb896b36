//! Heuristic relevance scoring.
//!
//! The score is a best-effort prioritization signal for deciding which
//! chunks survive a tight token budget. It is not a measure of ground-truth
//! relevance: every weight and vocabulary here is a hand-tuned starting
//! point and is exposed through [`RelevanceWeights`] so it can be adjusted
//! from the config file.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::rules::RuleTable;
use super::types::ContentType;

static MEDIA_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,2}:)?\d{1,2}:\d{2}\b").expect("Invalid media time regex")
});

/// Weights and vocabularies used by [`RelevanceScorer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceWeights {
    /// Starting score before adjustments
    #[serde(default = "default_base")]
    pub base: f64,
    /// Added per distinct importance keyword present
    #[serde(default = "default_importance_weight")]
    pub importance_keyword: f64,
    /// Added per distinct question keyword present
    #[serde(default = "default_question_weight")]
    pub question_keyword: f64,
    #[serde(default = "default_headings_weight")]
    pub headings: f64,
    #[serde(default = "default_structure_weight")]
    pub lists: f64,
    #[serde(default = "default_structure_weight")]
    pub code: f64,
    #[serde(default = "default_math_weight")]
    pub math: f64,
    /// Subtracted below 30 words
    #[serde(default = "default_very_short_penalty")]
    pub very_short_penalty: f64,
    /// Subtracted for 30 - 49 words
    #[serde(default = "default_short_penalty")]
    pub short_penalty: f64,
    /// Subtracted above 800 words
    #[serde(default = "default_long_penalty")]
    pub long_penalty: f64,
    /// PDF chunks that contain a heading
    #[serde(default = "default_type_bonus")]
    pub pdf_heading_bonus: f64,
    /// Media chunks that mention a time
    #[serde(default = "default_type_bonus")]
    pub media_time_bonus: f64,
    #[serde(default = "default_importance_keywords")]
    pub importance_keywords: Vec<String>,
    #[serde(default = "default_question_keywords")]
    pub question_keywords: Vec<String>,
    /// Words never reported as key terms
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
}

pub fn default_base() -> f64 {
    0.5
}

pub fn default_importance_weight() -> f64 {
    0.08
}

pub fn default_question_weight() -> f64 {
    0.04
}

pub fn default_headings_weight() -> f64 {
    0.10
}

pub fn default_structure_weight() -> f64 {
    0.05
}

pub fn default_math_weight() -> f64 {
    0.10
}

pub fn default_very_short_penalty() -> f64 {
    0.15
}

pub fn default_short_penalty() -> f64 {
    0.05
}

pub fn default_long_penalty() -> f64 {
    0.05
}

pub fn default_type_bonus() -> f64 {
    0.05
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

pub fn default_importance_keywords() -> Vec<String> {
    to_strings(&[
        "definition",
        "formula",
        "theorem",
        "example",
        "summary",
        "important",
        "key",
        "conclusion",
        "principle",
        "concept",
        "proof",
        "lemma",
        "result",
        "method",
    ])
}

pub fn default_question_keywords() -> Vec<String> {
    to_strings(&[
        "what", "why", "how", "when", "where", "which", "explain", "describe", "compare",
        "question",
    ])
}

pub fn default_stop_words() -> Vec<String> {
    to_strings(&[
        "the", "and", "that", "this", "with", "from", "have", "has", "had", "were", "was",
        "are", "for", "not", "but", "you", "your", "they", "them", "their", "there", "then",
        "than", "what", "when", "where", "which", "while", "who", "whom", "why", "how", "will",
        "would", "could", "should", "shall", "can", "may", "might", "must", "been", "being",
        "into", "onto", "over", "under", "about", "above", "below", "after", "before", "also",
        "just", "only", "very", "more", "most", "some", "such", "each", "other", "these",
        "those", "here", "does", "did", "doing", "done", "its", "it's", "our", "ours", "we're",
        "they're", "i'm", "all", "any", "both", "few", "many", "much", "own", "same", "too",
        "out", "off", "again", "further", "once", "because", "until", "against", "between",
        "through", "during", "without", "within", "upon", "like", "well", "back", "even",
        "still", "way", "get", "got", "make", "made", "let", "say", "said", "see", "going",
        "thing", "things", "really", "yeah", "okay", "right", "know",
    ])
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            base: default_base(),
            importance_keyword: default_importance_weight(),
            question_keyword: default_question_weight(),
            headings: default_headings_weight(),
            lists: default_structure_weight(),
            code: default_structure_weight(),
            math: default_math_weight(),
            very_short_penalty: default_very_short_penalty(),
            short_penalty: default_short_penalty(),
            long_penalty: default_long_penalty(),
            pdf_heading_bonus: default_type_bonus(),
            media_time_bonus: default_type_bonus(),
            importance_keywords: default_importance_keywords(),
            question_keywords: default_question_keywords(),
            stop_words: default_stop_words(),
        }
    }
}

impl RelevanceWeights {
    /// Validate configuration values.
    ///
    /// Returns `Ok(())` if all values are usable, or an error describing
    /// the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.base) {
            return Err(format!("relevance.base {} must be within 0.0..=1.0", self.base));
        }
        let weights = [
            ("importance_keyword", self.importance_keyword),
            ("question_keyword", self.question_keyword),
            ("headings", self.headings),
            ("lists", self.lists),
            ("code", self.code),
            ("math", self.math),
            ("very_short_penalty", self.very_short_penalty),
            ("short_penalty", self.short_penalty),
            ("long_penalty", self.long_penalty),
            ("pdf_heading_bonus", self.pdf_heading_bonus),
            ("media_time_bonus", self.media_time_bonus),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value.abs() > 1.0 {
                return Err(format!(
                    "relevance.{} {} must be a finite value within -1.0..=1.0",
                    name, value
                ));
            }
        }
        Ok(())
    }
}

/// Structural signals a score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureSignals {
    pub has_headings: bool,
    pub has_lists: bool,
    pub has_code: bool,
    pub has_math: bool,
    pub word_count: usize,
}

/// Table-driven relevance scorer built once per chunking pass.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    weights: RelevanceWeights,
    importance: RuleTable,
    questions: RuleTable,
    media_time: RuleTable,
}

impl RelevanceScorer {
    pub fn new(weights: &RelevanceWeights) -> Self {
        Self {
            importance: RuleTable::keywords(
                weights.importance_keywords.as_slice(),
                weights.importance_keyword,
            ),
            questions: RuleTable::keywords(
                weights.question_keywords.as_slice(),
                weights.question_keyword,
            ),
            media_time: RuleTable::new()
                .with_pattern(Regex::clone(&MEDIA_TIME), weights.media_time_bonus),
            weights: weights.clone(),
        }
    }

    /// Score a chunk. Always within `0.0..=1.0`.
    pub fn score(&self, text: &str, signals: &StructureSignals, content_type: ContentType) -> f64 {
        let w = &self.weights;
        let mut score = w.base;

        score += self.importance.score(text);
        score += self.questions.score(text);

        if signals.has_headings {
            score += w.headings;
        }
        if signals.has_lists {
            score += w.lists;
        }
        if signals.has_code {
            score += w.code;
        }
        if signals.has_math {
            score += w.math;
        }

        score -= match signals.word_count {
            0..=29 => w.very_short_penalty,
            30..=49 => w.short_penalty,
            801.. => w.long_penalty,
            _ => 0.0,
        };

        if content_type == ContentType::Pdf && signals.has_headings {
            score += w.pdf_heading_bonus;
        }
        if content_type.is_media() {
            score += self.media_time.score(text);
        }

        if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            w.base.clamp(0.0, 1.0)
        }
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(&RelevanceWeights::default())
    }
}
