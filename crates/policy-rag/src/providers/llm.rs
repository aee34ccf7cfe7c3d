//! LLM provider trait for generating decisions

use async_trait::async_trait;
use crate::error::Result;

/// Trait for language-model text generation
///
/// Implementations:
/// - `GeminiClient`: Google Gemini (gemini-1.5-flash), JSON mode
/// - `OllamaLlm`: Local Ollama server, JSON format
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate raw text for a prompt.
    ///
    /// The output may be wrapped in formatting noise such as code fences.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
