//! Ingestion pipeline orchestration: extract, chunk, embed, upsert

use bytes::Bytes;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorStoreProvider};
use crate::timing::{timed, timed_async};

use super::chunker::WordChunker;
use super::parser::TextExtractor;

/// Outcome of indexing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Filename the chunks were tagged with
    pub filename: String,
    /// IDs of the records written, in chunk order
    pub chunk_ids: Vec<String>,
}

impl IngestReport {
    /// Number of chunks written to the index
    pub fn chunks_indexed(&self) -> usize {
        self.chunk_ids.len()
    }
}

/// Main ingestion pipeline
pub struct IngestPipeline {
    /// Text extraction
    extractor: Arc<dyn TextExtractor>,
    /// Word-window chunker
    chunker: WordChunker,
    /// Embedding provider
    embedder: Arc<dyn EmbeddingProvider>,
    /// Vector index
    store: Arc<dyn VectorStoreProvider>,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        chunker: WordChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
    ) -> Self {
        Self {
            extractor,
            chunker,
            embedder,
            store,
        }
    }

    /// Chunker in use
    pub fn chunker(&self) -> &WordChunker {
        &self.chunker
    }

    /// Index one document.
    ///
    /// Any extraction or embedding failure aborts the document before the
    /// index is touched. All chunks are written with a single upsert.
    pub async fn ingest(&self, data: impl Into<Bytes>, filename: &str) -> Result<IngestReport> {
        let data: Bytes = data.into();

        let extractor = self.extractor.clone();
        let name = filename.to_string();
        let text = tokio::task::spawn_blocking(move || {
            timed("extract_text", || extractor.extract(&data, &name))
        })
        .await
        .map_err(|e| Error::Internal(format!("Task join error: {}", e)))??;

        let chunks = self.chunker.chunk_document(&text, filename);
        tracing::info!("Split '{}' into {} chunks", filename, chunks.len());

        if chunks.is_empty() {
            return Ok(IngestReport {
                filename: filename.to_string(),
                chunk_ids: Vec::new(),
            });
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings =
            timed_async("embed_chunks", self.embedder.embed_batch(&texts)).await?;

        if embeddings.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "{} returned {} embeddings for {} chunks",
                self.embedder.name(),
                embeddings.len(),
                chunks.len()
            )));
        }

        let records: Vec<_> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| chunk.into_record(embedding))
            .collect();
        let chunk_ids = records.iter().map(|r| r.id.clone()).collect();

        timed_async("upsert_chunks", self.store.upsert(records)).await?;

        Ok(IngestReport {
            filename: filename.to_string(),
            chunk_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::VectorMatch;
    use crate::types::{IndexedRecord, SOURCE_KEY};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Extractor that treats the bytes as UTF-8 text for `.pdf` names
    struct Utf8Extractor;

    impl TextExtractor for Utf8Extractor {
        fn extract(&self, data: &[u8], filename: &str) -> Result<String> {
            if !filename.ends_with(".pdf") {
                return Err(Error::UnsupportedFileType(filename.to_string()));
            }
            Ok(String::from_utf8_lossy(data).into_owned())
        }
    }

    struct LengthEmbedder {
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingProvider for LengthEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            if self.fail {
                return Err(Error::embedding("model offline"));
            }
            Ok(vec![text.len() as f32, 1.0])
        }

        fn dimensions(&self) -> usize {
            2
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(!self.fail)
        }

        fn name(&self) -> &str {
            "length"
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        batches: Mutex<Vec<Vec<IndexedRecord>>>,
    }

    #[async_trait]
    impl VectorStoreProvider for RecordingStore {
        async fn upsert(&self, records: Vec<IndexedRecord>) -> Result<()> {
            self.batches.lock().push(records);
            Ok(())
        }

        async fn query(&self, _embedding: &[f32], _k: usize) -> Result<Vec<VectorMatch>> {
            Ok(Vec::new())
        }

        async fn len(&self) -> Result<usize> {
            Ok(self.batches.lock().iter().map(Vec::len).sum())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn pipeline(fail_embedding: bool, store: Arc<RecordingStore>) -> IngestPipeline {
        IngestPipeline::new(
            Arc::new(Utf8Extractor),
            WordChunker::new(4, 1).unwrap(),
            Arc::new(LengthEmbedder {
                fail: fail_embedding,
            }),
            store,
        )
    }

    #[tokio::test]
    async fn test_single_batch_with_source_metadata() {
        let store = Arc::new(RecordingStore::default());
        let report = pipeline(false, store.clone())
            .ingest(b"one two three four five six seven".to_vec(), "policy.pdf")
            .await
            .unwrap();

        assert_eq!(report.chunks_indexed(), 2);

        let batches = store.batches.lock();
        assert_eq!(batches.len(), 1);
        assert!(batches[0]
            .iter()
            .all(|r| r.metadata.get(SOURCE_KEY).map(String::as_str) == Some("policy.pdf")));
        assert_eq!(
            batches[0].iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
            report.chunk_ids
        );
    }

    #[tokio::test]
    async fn test_unsupported_format_indexes_nothing() {
        let store = Arc::new(RecordingStore::default());
        let err = pipeline(false, store.clone())
            .ingest(b"text".to_vec(), "notes.txt")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedFileType(_)));
        assert!(store.batches.lock().is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_aborts_before_upsert() {
        let store = Arc::new(RecordingStore::default());
        let err = pipeline(true, store.clone())
            .ingest(b"some words here".to_vec(), "policy.pdf")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Embedding(_)));
        assert!(store.batches.lock().is_empty());
    }

    #[tokio::test]
    async fn test_empty_document_skips_upsert() {
        let store = Arc::new(RecordingStore::default());
        let report = pipeline(false, store.clone())
            .ingest(Vec::new(), "empty.pdf")
            .await
            .unwrap();

        assert_eq!(report.chunks_indexed(), 0);
        assert!(store.batches.lock().is_empty());
    }
}
