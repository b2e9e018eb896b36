//! Heuristic token estimation.
//!
//! Approximates a GPT-style tokenizer without invoking one. Text is first
//! classified into a [`TextKind`] using density signals (a small rule table,
//! first match wins), which picks a chars-per-token ratio. The refined
//! estimate blends that ratio with per-word pricing and adds fixed bonuses
//! for URLs, timestamps and symbol clusters.
//!
//! Estimation never fails: the worst case is degraded accuracy.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("Invalid URL regex"));

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,2}:)?\d{1,2}:\d{2}\b").expect("Invalid timestamp regex")
});

static MARKDOWN_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:#{1,6}\s|[-*+]\s|>\s?|\d+\.\s|\|)").expect("Invalid markdown regex")
});

static SYMBOL_CLUSTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]{2,}").expect("Invalid symbol cluster regex"));

const CODE_SYMBOLS: &str = "{}[]();<>=+*&|\\^~";
const TECHNICAL_SYMBOLS: &str = "%_=@#$/\\";

/// Coarse content classification driving the chars-per-token ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextKind {
    Code,
    Transcript,
    Markdown,
    Technical,
    English,
}

impl TextKind {
    /// Average characters per token for this kind of text.
    pub fn chars_per_token(&self) -> f64 {
        match self {
            TextKind::Code => 2.4,
            TextKind::Technical => 3.2,
            TextKind::Markdown => 3.6,
            TextKind::Transcript => 3.8,
            TextKind::English => 4.2,
        }
    }

    /// How much to trust an estimate for this kind (0.0 - 1.0).
    ///
    /// Code-heavy content carries more slack for budget decisions.
    pub fn confidence(&self) -> f64 {
        match self {
            TextKind::Code => 0.85,
            TextKind::Technical => 0.88,
            _ => 0.92,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextKind::Code => "code",
            TextKind::Transcript => "transcript",
            TextKind::Markdown => "markdown",
            TextKind::Technical => "technical",
            TextKind::English => "english",
        }
    }
}

impl std::fmt::Display for TextKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measured density signals for one piece of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSignals {
    pub characters: usize,
    pub code_fences: usize,
    pub code_symbol_ratio: f64,
    pub timestamps: usize,
    pub timestamps_per_500: f64,
    pub markdown_density: f64,
    pub url_count: usize,
    pub technical_ratio: f64,
    pub symbol_clusters: usize,
}

impl TextSignals {
    /// Measure all signals in one pass over the text (plus a few regex scans).
    pub fn measure(text: &str) -> Self {
        let mut characters = 0usize;
        let mut code_symbols = 0usize;
        let mut technical = 0usize;
        for c in text.chars() {
            characters += 1;
            if CODE_SYMBOLS.contains(c) {
                code_symbols += 1;
            }
            if c.is_ascii_digit() || TECHNICAL_SYMBOLS.contains(c) {
                technical += 1;
            }
        }
        if characters == 0 {
            return Self::default();
        }

        let timestamps = TIMESTAMP.find_iter(text).count();
        let non_empty_lines = text.lines().filter(|l| !l.trim().is_empty()).count();
        let markdown_lines = text.lines().filter(|l| MARKDOWN_LINE.is_match(l)).count();
        let chars = characters as f64;

        Self {
            characters,
            code_fences: text.matches("```").count() / 2,
            code_symbol_ratio: code_symbols as f64 / chars,
            timestamps,
            timestamps_per_500: timestamps as f64 * 500.0 / chars,
            markdown_density: if non_empty_lines == 0 {
                0.0
            } else {
                markdown_lines as f64 / non_empty_lines as f64
            },
            url_count: URL.find_iter(text).count(),
            technical_ratio: technical as f64 / chars,
            symbol_clusters: SYMBOL_CLUSTER.find_iter(text).count(),
        }
    }

    fn value(&self, signal: Signal) -> f64 {
        match signal {
            Signal::CodeFences => self.code_fences as f64,
            Signal::CodeSymbolRatio => self.code_symbol_ratio,
            Signal::TimestampsPer500 => self.timestamps_per_500,
            Signal::MarkdownDensity => self.markdown_density,
            Signal::UrlCount => self.url_count as f64,
            Signal::TechnicalRatio => self.technical_ratio,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    CodeFences,
    CodeSymbolRatio,
    TimestampsPer500,
    MarkdownDensity,
    UrlCount,
    TechnicalRatio,
}

struct ClassRule {
    kind: TextKind,
    signal: Signal,
    threshold: f64,
}

/// Classification rules, evaluated in order. Anything unmatched is English.
const CLASS_RULES: &[ClassRule] = &[
    ClassRule {
        kind: TextKind::Code,
        signal: Signal::CodeFences,
        threshold: 1.0,
    },
    ClassRule {
        kind: TextKind::Transcript,
        signal: Signal::TimestampsPer500,
        threshold: 1.0,
    },
    ClassRule {
        kind: TextKind::Code,
        signal: Signal::CodeSymbolRatio,
        threshold: 0.08,
    },
    ClassRule {
        kind: TextKind::Markdown,
        signal: Signal::MarkdownDensity,
        threshold: 0.25,
    },
    ClassRule {
        kind: TextKind::Technical,
        signal: Signal::UrlCount,
        threshold: 3.0,
    },
    ClassRule {
        kind: TextKind::Technical,
        signal: Signal::TechnicalRatio,
        threshold: 0.12,
    },
];

/// Detailed result of [`TokenEstimator::count_tokens`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCount {
    pub tokens: usize,
    pub characters: usize,
    pub words: usize,
    pub content_type: TextKind,
    pub confidence: f64,
}

/// Character/word heuristic token estimator.
#[derive(Debug, Clone)]
pub struct TokenEstimator {
    /// Extra tokens charged per URL
    url_bonus: f64,
    /// Extra tokens charged per timestamp occurrence
    timestamp_bonus: f64,
    /// Extra tokens charged per punctuation/code-symbol cluster
    symbol_cluster_bonus: f64,
}

impl TokenEstimator {
    /// Create an estimator with custom bonus charges.
    pub fn new(url_bonus: f64, timestamp_bonus: f64, symbol_cluster_bonus: f64) -> Self {
        Self {
            url_bonus,
            timestamp_bonus,
            symbol_cluster_bonus,
        }
    }

    /// Classify text by walking the rule table.
    pub fn classify(&self, text: &str) -> TextKind {
        classify_signals(&TextSignals::measure(text))
    }

    /// Estimate the token count for the given text. Empty input yields 0.
    pub fn estimate_tokens(&self, text: &str) -> usize {
        if text.trim().is_empty() {
            return 0;
        }
        let signals = TextSignals::measure(text);
        let kind = classify_signals(&signals);
        self.estimate_with(text, &signals, kind)
    }

    /// Estimate tokens and report the classification behind the estimate.
    pub fn count_tokens(&self, text: &str) -> TokenCount {
        let signals = TextSignals::measure(text);
        let kind = classify_signals(&signals);
        let tokens = if text.trim().is_empty() {
            0
        } else {
            self.estimate_with(text, &signals, kind)
        };
        TokenCount {
            tokens,
            characters: signals.characters,
            words: text.split_whitespace().count(),
            content_type: kind,
            confidence: kind.confidence(),
        }
    }

    fn estimate_with(&self, text: &str, signals: &TextSignals, kind: TextKind) -> usize {
        let ratio_estimate = signals.characters as f64 / kind.chars_per_token();
        let word_estimate: f64 = text.split_whitespace().map(price_word).sum();
        let bonus = signals.url_count as f64 * self.url_bonus
            + signals.timestamps as f64 * self.timestamp_bonus
            + signals.symbol_clusters as f64 * self.symbol_cluster_bonus;

        ((ratio_estimate + word_estimate) / 2.0 + bonus).ceil() as usize
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self {
            url_bonus: 5.0,
            timestamp_bonus: 2.0,
            symbol_cluster_bonus: 0.5,
        }
    }
}

fn classify_signals(signals: &TextSignals) -> TextKind {
    if signals.characters == 0 {
        return TextKind::English;
    }
    CLASS_RULES
        .iter()
        .find(|rule| signals.value(rule.signal) >= rule.threshold)
        .map(|rule| rule.kind)
        .unwrap_or(TextKind::English)
}

/// Price a single word by its length bucket.
fn price_word(word: &str) -> f64 {
    match word.chars().count() {
        0 => 0.0,
        1..=4 => 1.0,
        5..=8 => 1.3,
        9..=12 => 1.8,
        n => (n as f64 / 4.0).ceil(),
    }
}

/// Estimate tokens with the default estimator.
pub fn estimate_tokens(text: &str) -> usize {
    TokenEstimator::default().estimate_tokens(text)
}

/// Count tokens with the default estimator.
pub fn count_tokens(text: &str) -> TokenCount {
    TokenEstimator::default().count_tokens(text)
}
