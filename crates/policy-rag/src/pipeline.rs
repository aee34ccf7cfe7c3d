//! End-to-end orchestration of ingestion and query flows

use bytes::Bytes;
use std::sync::Arc;

use crate::config::{LlmBackend, RagConfig};
use crate::error::Result;
use crate::generation::ReasoningEngine;
use crate::ingestion::{FileParser, IngestPipeline, IngestReport, TextExtractor, WordChunker};
use crate::providers::{
    EmbeddingProvider, GeminiClient, LlmProvider, LocalVectorStore, OllamaEmbedder, OllamaLlm,
    VectorStoreProvider,
};
use crate::retrieval::Retriever;
use crate::types::Decision;

/// Wires extraction, chunking, embedding and the index for ingestion, and
/// retrieval plus reasoning for queries.
pub struct RagPipeline {
    ingest: IngestPipeline,
    retriever: Retriever,
    engine: ReasoningEngine,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    llm: Arc<dyn LlmProvider>,
}

impl RagPipeline {
    /// Build the pipeline with the providers named in `config`
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        config.validate()?;

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OllamaEmbedder::new(&config.embeddings)?);
        let store: Arc<dyn VectorStoreProvider> =
            Arc::new(LocalVectorStore::from_config(&config.vector_db)?);
        let llm: Arc<dyn LlmProvider> = match config.llm.provider {
            LlmBackend::Gemini => Arc::new(GeminiClient::new(&config.llm.gemini)?),
            LlmBackend::Ollama => Arc::new(OllamaLlm::new(&config.llm.ollama)?),
        };

        Self::with_providers(config, Arc::new(FileParser), embedder, store, llm)
    }

    /// Build the pipeline around caller-supplied collaborators
    pub fn with_providers(
        config: &RagConfig,
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        let chunker = WordChunker::from_config(&config.chunking)?;

        tracing::info!(
            "Pipeline ready: embeddings={}, index={}, llm={}, chunk_size={}, overlap={}",
            embedder.name(),
            store.name(),
            llm.name(),
            chunker.chunk_size(),
            chunker.overlap()
        );

        Ok(Self {
            ingest: IngestPipeline::new(extractor, chunker, embedder.clone(), store.clone()),
            retriever: Retriever::new(embedder.clone(), store.clone(), config.retrieval.top_k)?,
            engine: ReasoningEngine::new(llm.clone(), &config.reasoning),
            embedder,
            store,
            llm,
        })
    }

    /// Extract, chunk, embed and index one document
    pub async fn ingest(&self, data: impl Into<Bytes>, filename: &str) -> Result<IngestReport> {
        self.ingest.ingest(data, filename).await
    }

    /// Answer a query with a decision. Never fails.
    ///
    /// Retrieval failures produce a fallback decision. An empty retrieval
    /// still reaches the model, which sees that no clauses were found.
    pub async fn answer(&self, query: &str, top_k: Option<usize>) -> Decision {
        let clauses = match self.retriever.retrieve(query, top_k).await {
            Ok(clauses) => clauses,
            Err(e) => {
                tracing::warn!("Retrieval failed, returning fallback: {}", e);
                return self.engine.fallback(&e.to_string());
            }
        };

        tracing::info!("Retrieved {} clauses for query", clauses.len());
        self.engine.decide(query, &clauses).await
    }

    /// Number of records in the index
    pub async fn indexed_count(&self) -> Result<usize> {
        self.store.len().await
    }

    /// Check the embedding and language model providers
    pub async fn health_check(&self) -> (bool, bool) {
        let embeddings = self.embedder.health_check().await.unwrap_or(false);
        let llm = self.llm.health_check().await.unwrap_or(false);
        (embeddings, llm)
    }

    /// Provider names: (embeddings, index, llm)
    pub fn provider_names(&self) -> (&str, &str, &str) {
        (self.embedder.name(), self.store.name(), self.llm.name())
    }
}
