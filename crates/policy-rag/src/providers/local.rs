//! Local provider implementation over the on-disk redb index

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::retrieval::VectorStore;
use crate::types::IndexedRecord;

use super::vector_store::{VectorMatch, VectorStoreProvider};

/// Local vector store wrapping the blocking redb index
pub struct LocalVectorStore {
    store: Arc<VectorStore>,
}

impl LocalVectorStore {
    /// Create from existing VectorStore
    pub fn new(store: Arc<VectorStore>) -> Self {
        Self { store }
    }

    /// Create from config
    pub fn from_config(config: &VectorDbConfig) -> Result<Self> {
        let store = Arc::new(VectorStore::open(&config.storage_path)?);
        Ok(Self { store })
    }
}

#[async_trait]
impl VectorStoreProvider for LocalVectorStore {
    async fn upsert(&self, records: Vec<IndexedRecord>) -> Result<()> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.upsert(&records))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<VectorMatch>> {
        let store = self.store.clone();
        let query = embedding.to_vec();
        tokio::task::spawn_blocking(move || store.query(&query, k))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }

    async fn len(&self) -> Result<usize> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.len())
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }

    fn name(&self) -> &str {
        "local-redb"
    }
}
