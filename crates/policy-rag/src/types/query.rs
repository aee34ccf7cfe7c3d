//! Query request types

use serde::{Deserialize, Serialize};

/// Query request for a claim decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Natural-language claim or question
    pub query: String,

    /// Number of clauses to retrieve (defaults to the configured value)
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl QueryRequest {
    /// Create a request using the configured retrieval depth
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: None,
        }
    }
}
