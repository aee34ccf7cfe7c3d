//! Core types for the RAG system

pub mod document;
pub mod query;
pub mod response;

pub use document::{
    content_hash, Chunk, FileType, IndexedRecord, RetrievedClause, CHUNK_INDEX_KEY, SOURCE_KEY,
};
pub use query::QueryRequest;
pub use response::{truncate_chars, Clause, Decision, DecisionKind, IngestResponse};
