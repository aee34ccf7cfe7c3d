//! Reasoning engine: prompt, model call, parse, fallback

use std::sync::Arc;

use crate::config::ReasoningConfig;
use crate::error::Result;
use crate::providers::LlmProvider;
use crate::timing::timed_async;
use crate::types::{Decision, RetrievedClause};

use super::decision::parse_decision;
use super::prompt::PromptBuilder;

/// Turns a query and its retrieved clauses into a [`Decision`].
///
/// Each call is independent. Any failure along the way (model unreachable,
/// unparsable output, missing fields) becomes a fallback decision instead of
/// an error.
pub struct ReasoningEngine {
    llm: Arc<dyn LlmProvider>,
    prompt: PromptBuilder,
    fallback_reason_chars: usize,
}

impl ReasoningEngine {
    /// Create a new engine
    pub fn new(llm: Arc<dyn LlmProvider>, config: &ReasoningConfig) -> Self {
        Self {
            llm,
            prompt: PromptBuilder::new(config),
            fallback_reason_chars: config.fallback_reason_chars,
        }
    }

    /// Decide a query. Never fails.
    pub async fn decide(&self, query: &str, clauses: &[RetrievedClause]) -> Decision {
        match timed_async("reasoning", self.try_decide(query, clauses)).await {
            Ok(decision) => decision,
            Err(e) => {
                if e.is_upstream() {
                    tracing::warn!("Language model call failed, returning fallback: {}", e);
                } else {
                    tracing::warn!("Unusable model response, returning fallback: {}", e);
                }
                self.fallback(&e.to_string())
            }
        }
    }

    /// Decide a query, surfacing failures to the caller
    pub async fn try_decide(&self, query: &str, clauses: &[RetrievedClause]) -> Result<Decision> {
        let prompt = self.prompt.build(query, clauses);
        let raw = self.llm.generate(&prompt).await?;
        parse_decision(&raw)
    }

    /// Fallback decision carrying a truncated `reason`
    pub fn fallback(&self, reason: &str) -> Decision {
        Decision::fallback(reason, self.fallback_reason_chars)
    }
}
