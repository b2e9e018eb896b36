//! Table-driven weighted matching.
//!
//! A [`RuleTable`] is a list of `{matcher, weight}` pairs evaluated by one
//! generic scorer. Relevance scoring builds its keyword vocabularies and
//! pattern bonuses out of these tables so the heuristics can be tested
//! without running a splitter.

use regex::Regex;

/// How a rule decides whether it applies to a piece of text.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Case-insensitive substring containment (stored lowercase).
    Contains(String),
    /// Regular expression evaluated against the original text.
    Pattern(Regex),
}

impl Matcher {
    fn is_match(&self, original: &str, lowered: &str) -> bool {
        match self {
            Matcher::Contains(needle) => lowered.contains(needle.as_str()),
            Matcher::Pattern(re) => re.is_match(original),
        }
    }
}

/// A single weighted rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub matcher: Matcher,
    pub weight: f64,
}

/// Ordered collection of weighted rules.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table of case-insensitive keyword rules sharing one weight.
    ///
    /// Blank and duplicate keywords are ignored so each distinct keyword
    /// contributes at most once.
    pub fn keywords<S: AsRef<str>>(words: &[S], weight: f64) -> Self {
        let mut table = Self::new();
        for word in words {
            let needle = word.as_ref().trim().to_lowercase();
            if needle.is_empty() {
                continue;
            }
            let duplicate = table
                .rules
                .iter()
                .any(|r| matches!(&r.matcher, Matcher::Contains(n) if *n == needle));
            if !duplicate {
                table.push(Matcher::Contains(needle), weight);
            }
        }
        table
    }

    /// Append a rule.
    pub fn push(&mut self, matcher: Matcher, weight: f64) {
        self.rules.push(Rule { matcher, weight });
    }

    /// Builder-style [`push`](Self::push) for a regex rule.
    pub fn with_pattern(mut self, pattern: Regex, weight: f64) -> Self {
        self.push(Matcher::Pattern(pattern), weight);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of distinct rules that match `text`.
    pub fn match_count(&self, text: &str) -> usize {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .filter(|r| r.matcher.is_match(text, &lowered))
            .count()
    }

    /// Sum of weights of every rule that matches `text`.
    ///
    /// Each rule contributes once regardless of how often it occurs.
    pub fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .filter(|r| r.matcher.is_match(text, &lowered))
            .map(|r| r.weight)
            .sum()
    }
}
