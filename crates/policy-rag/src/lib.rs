//! policy-rag: document ingestion and claim decisions over a vector index
//!
//! Uploaded PDF, DOCX and mail files are split into overlapping word windows,
//! embedded and stored in a durable local index. Queries retrieve the closest
//! clauses and hand them to a language model acting as a rules engine, which
//! answers with a structured [`Decision`]. Query handling never fails: when the
//! model or any collaborator misbehaves the caller gets an `error` decision.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod timing;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::RagPipeline;
pub use types::{Clause, Decision, DecisionKind, IngestResponse, QueryRequest, RetrievedClause};
