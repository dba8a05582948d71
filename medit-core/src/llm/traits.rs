use super::types::{AnalysisTask, ChatMessage, ChatOptions, LlmError};
use async_trait::async_trait;
use serde_json::Value;

/// Common interface over LLM providers. Implementations are held behind
/// `Arc<dyn LlmService>` so the provider is a runtime configuration choice.
#[async_trait]
pub trait LlmService: Send + Sync + std::fmt::Debug {
    /// Generate an assistant reply for a chat-shaped message history.
    async fn generate_chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<String, LlmError>;

    /// Run a structured-analysis task over `text` and return the parsed JSON.
    ///
    /// Providers ask the model for JSON output; a reply that fails to parse
    /// is reported as [`LlmError::MalformedResponse`] carrying the raw text.
    async fn analyze(
        &self,
        text: &str,
        task: &AnalysisTask,
        options: &ChatOptions,
    ) -> Result<Value, LlmError>;

    /// Short provider identifier ("openai", "bedrock").
    fn provider_name(&self) -> &'static str;
}
