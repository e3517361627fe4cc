use async_trait::async_trait;
use cyons_common::{AppConfig, CyonsError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::llm_trait::LlmClient;
use crate::types::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
};

/// Longest wait between two attempts
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// OpenAI-compatible chat completions client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    max_retries: u32,
    client: Client,
}

/// Outcome of a single attempt
enum AttemptError {
    /// Worth another attempt (429, 5xx, transport)
    Retryable(CyonsError),
    /// Final (other 4xx, malformed body, empty content)
    Fatal(CyonsError),
}

impl OpenAiClient {
    /// Create new client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CyonsError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!("LLM client initialized: {} (model: {})", base_url, model);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model,
            temperature: 0.7,
            max_tokens: 1500,
            max_retries: 1,
            client,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = Self::new(
            config.openai_base_url.clone(),
            config.require_api_key()?,
            config.llm_model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(client
            .with_sampling(config.temperature, config.max_tokens)
            .with_max_retries(config.max_retries))
    }

    /// Set temperature and token limit
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Set attempts per completion (minimum 1)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Complete with the configured retry count
    pub async fn chat(&self, system: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
        };

        debug!(
            "Sending chat completion request - Model: {}, Prompt length: {}",
            request.model,
            prompt.len()
        );

        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.try_chat(&url, &request).await {
                Ok(text) => {
                    debug!("Received completion - Length: {}", text.len());
                    return Ok(text);
                }
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Retryable(e)) => {
                    if attempt < self.max_retries {
                        let delay = retry_delay(attempt);
                        warn!(
                            "Completion request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            attempt, self.max_retries, e, delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CyonsError::llm("All retries failed")))
    }

    /// Single attempt
    async fn try_chat(
        &self,
        url: &str,
        request: &ChatCompletionRequest,
    ) -> std::result::Result<String, AttemptError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AttemptError::Retryable(CyonsError::network(format!(
                    "Failed to send request: {}",
                    e
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            let err = CyonsError::llm(format!(
                "API error (status {}): {}",
                status.as_u16(),
                message
            ));

            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            return Err(if retryable {
                AttemptError::Retryable(err)
            } else {
                AttemptError::Fatal(err)
            });
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| {
                AttemptError::Fatal(CyonsError::llm(format!("Failed to parse response: {}", e)))
            })?;

        if let Some(usage) = &result.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        match result.text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(AttemptError::Fatal(CyonsError::llm(
                "Empty response from completion API",
            ))),
        }
    }

    /// Check that the API answers with the configured key
    pub async fn ping(&self) -> Result<bool> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                CyonsError::network(format!("Failed to connect to completion API: {}", e))
            })?;
        Ok(response.status().is_success())
    }
}

/// Exponential backoff after `attempt` (1-based), capped at `MAX_RETRY_DELAY`
fn retry_delay(attempt: u32) -> Duration {
    let secs = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_secs(secs).min(MAX_RETRY_DELAY)
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        self.chat(system, prompt).await
    }

    async fn test_connection(&self) -> Result<bool> {
        self.ping().await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
