//! Prompt template for claim decisions

use crate::config::ReasoningConfig;
use crate::types::{truncate_chars, RetrievedClause};

/// Separator placed between retrieved clauses in the prompt
pub const CLAUSE_SEPARATOR: &str = "\n---\n";

/// Builds the decision prompt from a query and retrieved clauses.
///
/// The output is a pure function of its inputs and the bounds in
/// [`ReasoningConfig`]: at most `max_documents` clauses are included and each
/// is cut to `max_document_chars` characters.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    domain: String,
    max_documents: usize,
    max_document_chars: usize,
    max_justification_words: usize,
    max_clauses: usize,
}

impl PromptBuilder {
    /// Create from reasoning configuration
    pub fn new(config: &ReasoningConfig) -> Self {
        Self {
            domain: config.domain.clone(),
            max_documents: config.max_documents,
            max_document_chars: config.max_document_chars,
            max_justification_words: config.max_justification_words,
            max_clauses: config.max_clauses,
        }
    }

    /// Maximum clauses placed in a prompt
    pub fn max_documents(&self) -> usize {
        self.max_documents
    }

    /// Join the first `max_documents` clauses, each tagged with its source
    pub fn build_context(&self, clauses: &[RetrievedClause]) -> String {
        if clauses.is_empty() {
            return "(no relevant clauses were found)".to_string();
        }

        clauses
            .iter()
            .take(self.max_documents)
            .enumerate()
            .map(|(i, clause)| {
                format!(
                    "[{}] (source: {})\n{}",
                    i + 1,
                    clause.source,
                    truncate_chars(&clause.text, self.max_document_chars)
                )
            })
            .collect::<Vec<_>>()
            .join(CLAUSE_SEPARATOR)
    }

    /// Build the full decision prompt
    pub fn build(&self, query: &str, clauses: &[RetrievedClause]) -> String {
        format!(
            r#"You are a rules engine for {domain} decisions. Decide the user's query using only the clauses below.

USER QUERY:
{query}

RELEVANT CLAUSES:
{context}

OUTPUT FORMAT:
Respond with one JSON object and nothing else, in exactly this shape:
{{"decision": "approved" | "rejected" | "partial", "amount": <number or null>, "justification": "<string>", "clauses": [{{"text": "<clause text>", "source": "<filename>"}}]}}

CONSTRAINTS:
- "justification" must be at most {words} words.
- "clauses" must hold at most {max_clauses} entries quoted from the clauses above, with their source filename.
- "amount" is null when no payable amount applies."#,
            domain = self.domain,
            query = query.trim(),
            context = self.build_context(clauses),
            words = self.max_justification_words,
            max_clauses = self.max_clauses,
        )
    }
}
