//! Vector store provider trait for storing and searching embeddings

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::IndexedRecord;

/// Search result from vector store
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatch {
    /// Record ID
    pub id: String,
    /// Stored text
    pub text: String,
    /// Stored metadata
    pub metadata: BTreeMap<String, String>,
    /// Similarity score (higher is more similar)
    pub similarity: f32,
}

/// Trait for vector storage and similarity search
///
/// Implementations:
/// - `LocalVectorStore`: durable on-disk index (redb)
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Insert or overwrite records keyed by ID, as one batch
    async fn upsert(&self, records: Vec<IndexedRecord>) -> Result<()>;

    /// Return up to `k` records ranked by descending similarity
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<VectorMatch>>;

    /// Get total number of records stored
    async fn len(&self) -> Result<usize>;

    /// Check if store is empty
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Get provider name for logging
    fn name(&self) -> &str;
}
