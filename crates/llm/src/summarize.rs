use cyons_common::Style;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::llm_trait::LlmClient;
use crate::manifesto::ManifestoSet;
use crate::prompts::{compile_prompt, SYSTEM_PROMPT};
use crate::review::{review, ReviewReport};
use crate::types::{ControlParams, Generation};

/// One summarization request
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub style: Style,
    pub article: String,
    pub controls: ControlParams,
}

impl SummaryRequest {
    /// Create new request
    pub fn new(style: Style, article: impl Into<String>, controls: ControlParams) -> Self {
        Self {
            style,
            article: article.into(),
            controls,
        }
    }
}

/// Everything produced for one request
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRun {
    /// Style whose manifesto was used
    pub style: Style,

    pub controls: ControlParams,

    /// Model that served the request
    pub model: String,

    /// Exact prompt sent to the model
    pub prompt: String,

    pub generation: Generation,

    /// Heuristic review, absent when a failed generation was not reviewed
    pub review: Option<ReviewReport>,
}

/// Controlled summarizer: manifesto lookup, prompt compilation, completion, review
pub struct Summarizer {
    client: Arc<dyn LlmClient>,
    manifestos: ManifestoSet,
    review_failed_output: bool,
}

impl Summarizer {
    /// Create new summarizer
    pub fn new(client: Arc<dyn LlmClient>, manifestos: ManifestoSet) -> Self {
        Self {
            client,
            manifestos,
            review_failed_output: false,
        }
    }

    /// Also review error text when generation fails
    pub fn review_failed_output(mut self, enabled: bool) -> Self {
        self.review_failed_output = enabled;
        self
    }

    /// Loaded manifestos
    pub fn manifestos(&self) -> &ManifestoSet {
        &self.manifestos
    }

    /// Underlying LLM client
    pub fn client(&self) -> &Arc<dyn LlmClient> {
        &self.client
    }

    /// Compile the prompt for a request without calling the model
    pub fn compile(&self, request: &SummaryRequest) -> String {
        self.compile_resolved(request).1
    }

    // Style actually used (after default fallback) and its prompt
    fn compile_resolved(&self, request: &SummaryRequest) -> (Style, String) {
        let (style, manifesto) = self.manifestos.resolve_style(request.style);
        (
            style,
            compile_prompt(manifesto, &request.article, &request.controls),
        )
    }

    /// Run the full pipeline
    ///
    /// Never fails: an API error becomes `Generation::Failed` with a readable message.
    pub async fn summarize(&self, request: &SummaryRequest) -> SummaryRun {
        info!(
            "Starting summarization - Style: {}, Article length: {} chars, Compression: {}, Bias avoidance: {}",
            request.style.key(),
            request.article.len(),
            request.controls.compression,
            request.controls.bias_avoidance
        );

        let (style, prompt) = self.compile_resolved(request);

        let generation = match self.client.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(text) => {
                info!("Summary generated - Length: {} chars", text.len());
                Generation::Summary(text)
            }
            Err(e) => {
                warn!("Summary generation failed: {}", e);
                Generation::Failed(format!(
                    "Error during summary generation (API call failed). Check your API key configuration and network connection. Error: {}",
                    e
                ))
            }
        };

        let review = if generation.is_summary() || self.review_failed_output {
            Some(review(generation.text()))
        } else {
            None
        };

        SummaryRun {
            style,
            controls: request.controls,
            model: self.client.model().to_string(),
            prompt,
            generation,
            review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cyons_common::{CyonsError, Result};
    use std::sync::Mutex;

    /// Records prompts and answers with a canned result
    struct StubClient {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl StubClient {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for StubClient {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            self.reply.clone().map_err(CyonsError::llm)
        }

        async fn test_connection(&self) -> Result<bool> {
            Ok(true)
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn manifestos() -> ManifestoSet {
        ManifestoSet::from_entries(
            [
                (Style::Sherlock, "SHERLOCK MANIFESTO".to_string()),
                (Style::Policy, "POLICY MANIFESTO".to_string()),
            ],
            Style::Sherlock,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_summarize_success_is_reviewed() {
        let client = Arc::new(StubClient::ok(
            "The vote passed because turnout was high. However, delays followed.",
        ));
        let summarizer = Summarizer::new(client.clone(), manifestos());
        let request =
            SummaryRequest::new(Style::Policy, "Article body.", ControlParams::new(0.9, 0.95));

        let run = summarizer.summarize(&request).await;

        assert_eq!(run.style, Style::Policy);
        assert_eq!(run.model, "stub-model");
        assert!(run.generation.is_summary());
        assert!(run.prompt.contains("POLICY MANIFESTO"));
        assert!(run.prompt.contains("Article body."));

        let review = run.review.unwrap();
        assert_eq!(review.transition_words, vec!["because", "however"]);

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SYSTEM_PROMPT);
        assert_eq!(seen[0].1, run.prompt);
    }

    #[tokio::test]
    async fn test_failed_generation_skips_review_by_default() {
        let summarizer = Summarizer::new(Arc::new(StubClient::failing("status 401")), manifestos());
        let request = SummaryRequest::new(Style::Sherlock, "Article.", ControlParams::default());

        let run = summarizer.summarize(&request).await;

        assert!(!run.generation.is_summary());
        assert!(run.generation.text().starts_with("Error during summary generation"));
        assert!(run.generation.text().contains("status 401"));
        assert!(run.review.is_none());
    }

    #[tokio::test]
    async fn test_failed_generation_reviewed_when_enabled() {
        let summarizer = Summarizer::new(Arc::new(StubClient::failing("timeout")), manifestos())
            .review_failed_output(true);
        let request = SummaryRequest::new(Style::Sherlock, "Article.", ControlParams::default());

        let run = summarizer.summarize(&request).await;

        let review = run.review.unwrap();
        assert_eq!(review.word_count, run.generation.text().split_whitespace().count());
    }

    #[test]
    fn test_compile_falls_back_to_default_manifesto() {
        let summarizer = Summarizer::new(Arc::new(StubClient::ok("x")), manifestos());
        let request = SummaryRequest::new(Style::Critic, "Article.", ControlParams::default());

        let prompt = summarizer.compile(&request);
        assert!(prompt.contains("SHERLOCK MANIFESTO"));
    }

    #[tokio::test]
    async fn test_run_reports_style_actually_used() {
        let client = Arc::new(StubClient::ok("Short summary."));
        let summarizer = Summarizer::new(client.clone(), manifestos());
        let request = SummaryRequest::new(Style::Critic, "Article.", ControlParams::default());

        let run = summarizer.summarize(&request).await;

        assert_eq!(run.style, Style::Sherlock);
        assert!(run.prompt.contains("SHERLOCK MANIFESTO"));
        assert!(!run.prompt.contains("POLICY MANIFESTO"));
        assert_eq!(client.seen.lock().unwrap()[0].1, run.prompt);
    }
}
