//! Heuristic review of generated summaries
//!
//! Three independent lexical passes over the summary text: length adequacy,
//! transition-word presence (coherence proxy) and opinion-word presence (bias
//! proxy). Nothing here checks facts.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

/// Below this many words a summary is flagged as too short
pub const MIN_WORDS: usize = 50;

/// Above this many words a summary is flagged as too long
pub const MAX_WORDS: usize = 300;

/// Transition words used as a logical-coherence proxy
pub const TRANSITION_WORDS: &[&str] = &[
    "because",
    "therefore",
    "however",
    "while",
    "thus",
    "although",
];

/// Opinion words used as a tone/bias proxy
pub const OPINION_WORDS: &[&str] = &["should", "must", "clearly", "obviously", "undoubtedly"];

/// Mandatory closing statement of every report
pub const DISCLAIMER: &str = "Note: This review is a heuristic indicator based on surface-level lexical signals. It does NOT constitute factual verification.";

/// Length adequacy verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthAssessment {
    TooShort,
    Appropriate,
    TooLong,
}

impl LengthAssessment {
    fn from_word_count(word_count: usize) -> Self {
        if word_count < MIN_WORDS {
            LengthAssessment::TooShort
        } else if word_count > MAX_WORDS {
            LengthAssessment::TooLong
        } else {
            LengthAssessment::Appropriate
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            LengthAssessment::TooShort => "Summary may be too short, risk of oversimplification.",
            LengthAssessment::Appropriate => {
                "Summary length suggests an appropriate compression level."
            }
            LengthAssessment::TooLong => "Summary may be too long, risk of redundancy.",
        }
    }
}

/// Three-step signal level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for SignalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignalLevel::Low => "Low",
            SignalLevel::Moderate => "Moderate",
            SignalLevel::High => "High",
        })
    }
}

/// Structured heuristic review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewReport {
    /// Whitespace-delimited token count of the original text
    pub word_count: usize,

    pub length: LengthAssessment,

    /// Distinct transition words present, sorted
    pub transition_words: Vec<String>,

    pub coherence: SignalLevel,

    /// Distinct opinion words present, sorted
    pub opinion_words: Vec<String>,

    pub bias_risk: SignalLevel,
}

/// Review a summary
///
/// Total over all inputs, the empty string included.
pub fn review(summary: &str) -> ReviewReport {
    let word_count = summary.split_whitespace().count();

    let lowered = summary.to_lowercase();
    let transition_words = distinct_matches(transition_pattern(), &lowered);
    let opinion_words = distinct_matches(opinion_pattern(), &lowered);

    let coherence = match transition_words.len() {
        0 => SignalLevel::Low,
        1 => SignalLevel::Moderate,
        _ => SignalLevel::High,
    };

    let bias_risk = match opinion_words.len() {
        0 => SignalLevel::Low,
        1 | 2 => SignalLevel::Moderate,
        _ => SignalLevel::High,
    };

    ReviewReport {
        word_count,
        length: LengthAssessment::from_word_count(word_count),
        transition_words,
        coherence,
        opinion_words,
        bias_risk,
    }
}

/// Review a summary and render the text report
pub fn review_text(summary: &str) -> String {
    review(summary).to_string()
}

fn transition_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| keyword_pattern(TRANSITION_WORDS))
}

fn opinion_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| keyword_pattern(OPINION_WORDS))
}

fn keyword_pattern(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).unwrap()
}

// Presence, not frequency: each keyword counts once however often it appears.
fn distinct_matches(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn format_hits(words: &[String]) -> String {
    if words.is_empty() {
        words.len().to_string()
    } else {
        format!("{} ({})", words.len(), words.join(", "))
    }
}

impl fmt::Display for ReviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HEURISTIC REVIEW REPORT")?;
        writeln!(f)?;
        writeln!(f, "Length Adequacy:")?;
        writeln!(f, "- Word count: {}", self.word_count)?;
        writeln!(f, "- Assessment: {}", self.length.describe())?;
        writeln!(f)?;
        writeln!(f, "Logical Coherence (transition-word proxy):")?;
        writeln!(f, "- Transition words found: {}", format_hits(&self.transition_words))?;
        writeln!(f, "- Coherence: {}", self.coherence)?;
        writeln!(f)?;
        writeln!(f, "Tone / Bias (opinion-word proxy):")?;
        writeln!(f, "- Opinion words found: {}", format_hits(&self.opinion_words))?;
        writeln!(f, "- Bias risk: {}", self.bias_risk)?;
        writeln!(f)?;
        write!(f, "{}", DISCLAIMER)
    }
}
