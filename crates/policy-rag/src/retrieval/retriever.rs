//! Query-side retrieval: embed once, look up once

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorStoreProvider};
use crate::types::{RetrievedClause, SOURCE_KEY};

/// Embeds a query and returns the closest indexed clauses.
///
/// Ordering is whatever the vector store reports; no re-ranking happens here.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    default_k: usize,
}

impl Retriever {
    /// Create a retriever returning `default_k` clauses unless told otherwise
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        default_k: usize,
    ) -> Result<Self> {
        if default_k == 0 {
            return Err(Error::config("retrieval top_k must be at least 1"));
        }

        Ok(Self {
            embedder,
            store,
            default_k,
        })
    }

    /// Result count used when the caller does not pick one
    pub fn default_k(&self) -> usize {
        self.default_k
    }

    /// Retrieve up to `k` clauses (default when `None`), most similar first.
    ///
    /// An index holding fewer than `k` records yields a shorter list.
    pub async fn retrieve(&self, query: &str, k: Option<usize>) -> Result<Vec<RetrievedClause>> {
        let k = k.unwrap_or(self.default_k);
        if k == 0 {
            return Err(Error::config("k must be at least 1"));
        }

        let embedding = self.embedder.embed(query).await?;
        let matches = self.store.query(&embedding, k).await?;

        tracing::debug!(
            "Retrieved {} of {} requested clauses from {}",
            matches.len(),
            k,
            self.store.name()
        );

        Ok(matches
            .into_iter()
            .map(|m| RetrievedClause {
                source: m
                    .metadata
                    .get(SOURCE_KEY)
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                text: m.text,
                similarity: m.similarity,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::VectorMatch;
    use crate::types::IndexedRecord;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::BTreeMap;

    struct FixedEmbedder {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            *self.calls.lock() += 1;
            Ok(vec![1.0, 0.0])
        }

        fn dimensions(&self) -> usize {
            2
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// Store returning canned matches, truncated to k
    struct CannedStore {
        matches: Vec<VectorMatch>,
        queries: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl VectorStoreProvider for CannedStore {
        async fn upsert(&self, _records: Vec<IndexedRecord>) -> Result<()> {
            Ok(())
        }

        async fn query(&self, _embedding: &[f32], k: usize) -> Result<Vec<VectorMatch>> {
            self.queries.lock().push(k);
            Ok(self.matches.iter().take(k).cloned().collect())
        }

        async fn len(&self) -> Result<usize> {
            Ok(self.matches.len())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn canned(texts: &[(&str, &str, f32)]) -> Arc<CannedStore> {
        let matches = texts
            .iter()
            .map(|(text, source, similarity)| {
                let mut metadata = BTreeMap::new();
                metadata.insert(SOURCE_KEY.to_string(), source.to_string());
                VectorMatch {
                    id: text.to_string(),
                    text: text.to_string(),
                    metadata,
                    similarity: *similarity,
                }
            })
            .collect();

        Arc::new(CannedStore {
            matches,
            queries: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_short_index_returns_shorter_list() {
        let embedder = Arc::new(FixedEmbedder {
            calls: Mutex::new(0),
        });
        let store = canned(&[("room rent cap", "a.pdf", 0.4), ("dental excluded", "b.pdf", 0.2)]);
        let retriever = Retriever::new(embedder.clone(), store.clone(), 8).unwrap();

        let clauses = retriever.retrieve("knee surgery claim", None).await.unwrap();

        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].text, "room rent cap");
        assert_eq!(clauses[0].source, "a.pdf");
        assert_eq!(clauses[1].source, "b.pdf");
        assert_eq!(*embedder.calls.lock(), 1);
        assert_eq!(*store.queries.lock(), vec![8]);
    }

    #[tokio::test]
    async fn test_explicit_k_and_empty_index() {
        let embedder = Arc::new(FixedEmbedder {
            calls: Mutex::new(0),
        });
        let retriever = Retriever::new(embedder, canned(&[]), 8).unwrap();

        assert!(retriever.retrieve("anything", Some(3)).await.unwrap().is_empty());
        assert!(matches!(
            retriever.retrieve("anything", Some(0)).await,
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_zero_default_k_is_rejected() {
        let embedder = Arc::new(FixedEmbedder {
            calls: Mutex::new(0),
        });
        assert!(matches!(
            Retriever::new(embedder, canned(&[]), 0),
            Err(Error::Config(_))
        ));
    }
}
