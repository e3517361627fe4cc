use async_trait::async_trait;
use cyons_common::Result;

/// Common trait for LLM clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Complete a prompt under a system instruction
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;

    /// Test connection/availability
    async fn test_connection(&self) -> Result<bool>;

    /// Model used for completions
    fn model(&self) -> &str;
}
