//! Vector index and query-side retrieval

mod retriever;
mod store;

pub use retriever::Retriever;
pub use store::VectorStore;
