//! cyons LLM integration
//!
//! Prompt compilation, heuristic review, manifesto lookup and the
//! chat completions client behind the controlled summarizer.

mod client;
mod llm_trait;
mod manifesto;
mod prompts;
mod review;
mod summarize;
mod types;

pub use client::OpenAiClient;
pub use llm_trait::LlmClient;
pub use manifesto::ManifestoSet;
pub use prompts::{bias_instruction, compile_prompt, length_instruction, SYSTEM_PROMPT};
pub use review::{
    review, review_text, LengthAssessment, ReviewReport, SignalLevel, DISCLAIMER, MAX_WORDS,
    MIN_WORDS, OPINION_WORDS, TRANSITION_WORDS,
};
pub use summarize::{Summarizer, SummaryRequest, SummaryRun};
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ControlParams, Generation,
    BIAS_AVOIDANCE_RANGE, COMPRESSION_RANGE,
};
