//! Deterministic collaborators shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use policy_rag::config::RagConfig;
use policy_rag::error::{Error, Result};
use policy_rag::ingestion::TextExtractor;
use policy_rag::providers::{EmbeddingProvider, LlmProvider, LocalVectorStore, VectorStoreProvider};
use policy_rag::RagPipeline;
use std::sync::Arc;
use tempfile::TempDir;

pub const DIMENSIONS: usize = 16;

/// Treats `.pdf` uploads as UTF-8 text and rejects everything else
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, data: &[u8], filename: &str) -> Result<String> {
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(Error::UnsupportedFileType(filename.to_string()));
        }
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

/// Bag-of-words embedder hashing each word into a fixed bucket
pub struct HashingEmbedder;

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; DIMENSIONS];
        for word in text.split_whitespace() {
            let bucket = word
                .to_lowercase()
                .bytes()
                .fold(7usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
            vector[bucket % DIMENSIONS] += 1.0;
        }
        // Keep the vector non-zero so cosine is defined
        vector[0] += 0.01;
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

/// Language model replaying one canned reply and recording prompts
pub struct ScriptedLlm {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(Error::llm(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.reply.is_ok())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Pipeline over a real on-disk index in a temporary directory
pub struct Harness {
    pub pipeline: RagPipeline,
    pub store: Arc<LocalVectorStore>,
    pub llm: Arc<ScriptedLlm>,
    pub config: RagConfig,
    pub dir: TempDir,
}

impl Harness {
    pub fn new(config: RagConfig, llm: ScriptedLlm) -> Self {
        Self::with_extractor(config, llm, Arc::new(PlainTextExtractor))
    }

    pub fn with_extractor(
        mut config: RagConfig,
        llm: ScriptedLlm,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        config.vector_db.storage_path = dir.path().join("vectors.redb");
        config.embeddings.dimensions = DIMENSIONS;

        let store = Arc::new(LocalVectorStore::from_config(&config.vector_db).unwrap());
        let llm = Arc::new(llm);

        let pipeline = RagPipeline::with_providers(
            &config,
            extractor,
            Arc::new(HashingEmbedder),
            store.clone(),
            llm.clone(),
        )
        .unwrap();

        Self {
            pipeline,
            store,
            llm,
            config,
            dir,
        }
    }

    pub async fn indexed(&self) -> usize {
        self.store.len().await.unwrap()
    }
}

/// `n` distinct words: "w0 w1 ... w{n-1}"
pub fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
}

pub const APPROVED_REPLY: &str = "```json\n{\"decision\":\"approved\",\"amount\":5000,\"justification\":\"covered\",\"clauses\":[]}\n```";
