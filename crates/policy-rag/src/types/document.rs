//! Document and chunk types with source tracking for clauses

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Metadata key carrying the originating filename of every indexed record
pub const SOURCE_KEY: &str = "source";

/// Metadata key carrying the chunk's position within its document
pub const CHUNK_INDEX_KEY: &str = "chunk_index";

/// Supported file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Mail message (.eml / .msg)
    Email,
    /// Unknown file type
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "eml" | "msg" => Self::Email,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from a filename's extension
    pub fn from_filename(filename: &str) -> Self {
        std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

/// Lower-hex SHA-256 of a text; identity of chunks in the vector index
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// A chunk of text from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Content-derived ID (identical text shares an ID)
    pub id: String,
    /// Text content
    pub content: String,
    /// Originating filename
    pub source: String,
    /// Chunk index within document
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: String, source: impl Into<String>, chunk_index: u32) -> Self {
        Self {
            id: content_hash(&content),
            content,
            source: source.into(),
            chunk_index,
        }
    }

    /// Metadata stored alongside the chunk in the vector index
    pub fn to_vector_metadata(&self) -> BTreeMap<String, String> {
        let mut meta = BTreeMap::new();
        meta.insert(SOURCE_KEY.to_string(), self.source.clone());
        meta.insert(CHUNK_INDEX_KEY.to_string(), self.chunk_index.to_string());
        meta
    }

    /// Attach an embedding, producing the record written to the index
    pub fn into_record(self, embedding: Vec<f32>) -> IndexedRecord {
        let metadata = self.to_vector_metadata();
        IndexedRecord {
            id: self.id,
            embedding,
            text: self.content,
            metadata,
        }
    }
}

/// A record stored durably in the vector index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedRecord {
    /// Record ID (content hash of `text`)
    pub id: String,
    /// Embedding vector
    pub embedding: Vec<f32>,
    /// Chunk text
    pub text: String,
    /// Metadata; always carries [`SOURCE_KEY`]
    pub metadata: BTreeMap<String, String>,
}

impl IndexedRecord {
    /// Originating filename
    pub fn source(&self) -> &str {
        self.metadata
            .get(SOURCE_KEY)
            .map(String::as_str)
            .unwrap_or("unknown")
    }
}

/// A chunk returned as retrieval evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedClause {
    /// Chunk text
    pub text: String,
    /// Originating filename
    pub source: String,
    /// Similarity reported by the vector index (higher is closer)
    pub similarity: f32,
}
