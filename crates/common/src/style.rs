use crate::error::CyonsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Summarization persona selected by the user
///
/// Each style is paired with a manifesto text that defines tone and objective.
/// `Sherlock` is the primary persona and the default fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Deductive, evidence-first reading of the article
    #[default]
    Sherlock,
    /// Policy briefing: stakeholders, measures, consequences
    Policy,
    /// Critical review: claims, gaps, counterpoints
    Critic,
}

impl Style {
    /// All styles in presentation order
    pub const ALL: [Style; 3] = [Style::Sherlock, Style::Policy, Style::Critic];

    /// Lower-case key (manifesto file stem, JSON value)
    pub fn key(&self) -> &'static str {
        match self {
            Style::Sherlock => "sherlock",
            Style::Policy => "policy",
            Style::Critic => "critic",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Style::Sherlock => "Sherlock",
            Style::Policy => "Policy",
            Style::Critic => "Critic",
        }
    }

    /// Parse a style key, resolving unknown keys to `fallback`
    pub fn parse_or(input: &str, fallback: Style) -> Style {
        match input.parse() {
            Ok(style) => style,
            Err(_) => {
                warn!(
                    "Unknown style '{}', falling back to '{}'",
                    input,
                    fallback.key()
                );
                fallback
            }
        }
    }
}

impl FromStr for Style {
    type Err = CyonsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| CyonsError::invalid_input(format!("Unknown style: '{}'", key)))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
