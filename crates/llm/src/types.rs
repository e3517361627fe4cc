use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Range offered to users for the compression control
pub const COMPRESSION_RANGE: RangeInclusive<f64> = 0.1..=1.0;

/// Range offered to users for the bias-avoidance control
pub const BIAS_AVOIDANCE_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// The two scalar summary controls
///
/// Ranges are a presentation concern; the prompt compiler accepts any value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlParams {
    /// 0.1 = very short, 1.0 = maximum length
    pub compression: f64,

    /// 0.0 = ignore bias, 1.0 = strict neutrality
    pub bias_avoidance: f64,
}

impl ControlParams {
    /// Create new control parameters
    pub fn new(compression: f64, bias_avoidance: f64) -> Self {
        Self {
            compression,
            bias_avoidance,
        }
    }
}

impl Default for ControlParams {
    fn default() -> Self {
        Self::new(0.6, 0.7)
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// "system" | "user" | "assistant"
    pub role: String,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completions request
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model name (e.g., "gpt-3.5-turbo")
    pub model: String,

    /// Conversation, system message first
    pub messages: Vec<ChatMessage>,

    /// Temperature (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Chat completions response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices
    #[serde(default)]
    pub choices: Vec<ChatChoice>,

    /// Token accounting
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// Single completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message inside a choice (content may be null)
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Error envelope returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Outcome of a generation call
///
/// A failure keeps a human-readable message so the presentation layer can show
/// it in place of a summary, while callers can still tell the two apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum Generation {
    /// Completion text from the model
    Summary(String),

    /// Error message substituted for a summary
    Failed(String),
}

impl Generation {
    /// Summary or error text
    pub fn text(&self) -> &str {
        match self {
            Generation::Summary(text) | Generation::Failed(text) => text,
        }
    }

    /// Whether the model produced a summary
    pub fn is_summary(&self) -> bool {
        matches!(self, Generation::Summary(_))
    }

    /// "ok" or "failed"
    pub fn status(&self) -> &'static str {
        match self {
            Generation::Summary(_) => "ok",
            Generation::Failed(_) => "failed",
        }
    }
}
