//! Decision generation with a language model

mod decision;
mod ollama;
mod prompt;
mod reasoning;

pub use decision::{parse_decision, strip_code_fence};
pub use ollama::OllamaClient;
pub use prompt::{PromptBuilder, CLAUSE_SEPARATOR};
pub use reasoning::ReasoningEngine;
