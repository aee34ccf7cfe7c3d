//! Document ingestion: text extraction, word chunking and indexing

mod chunker;
mod parser;
mod processor;

pub use chunker::{Chunks, WordChunker};
pub use parser::{FileParser, ParsedDocument, TextExtractor};
pub use processor::{IngestPipeline, IngestReport};
