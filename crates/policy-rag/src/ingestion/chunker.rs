//! Word-window chunking with overlap

use std::iter::FusedIterator;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::Chunk;

/// Splits text into overlapping windows of whitespace-separated words.
///
/// Each window holds at most `chunk_size` words; consecutive windows share
/// `overlap` words, so the window start advances by `chunk_size - overlap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordChunker {
    /// Maximum words per chunk
    chunk_size: usize,
    /// Words shared between consecutive chunks
    overlap: usize,
}

impl WordChunker {
    /// Create a new chunker.
    ///
    /// Fails with a configuration error unless `0 <= overlap < chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        ChunkingConfig {
            chunk_size,
            chunk_overlap: overlap,
        }
        .validate()?;

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Create from configuration
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Maximum words per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Words shared between consecutive chunks
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// How far the window start advances between chunks
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Lazily split `text` into chunk strings.
    ///
    /// Calling this again on the same text yields the same sequence.
    pub fn split<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks {
            words: text.split_whitespace().collect(),
            start: 0,
            chunk_size: self.chunk_size,
            stride: self.stride(),
        }
    }

    /// Split `text` into chunks tagged with their source filename
    pub fn chunk_document(&self, text: &str, filename: &str) -> Vec<Chunk> {
        self.split(text)
            .enumerate()
            .map(|(i, content)| Chunk::new(content, filename, i as u32))
            .collect()
    }
}

/// Iterator over word windows produced by [`WordChunker::split`]
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    words: Vec<&'a str>,
    start: usize,
    chunk_size: usize,
    stride: usize,
}

impl Iterator for Chunks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.start >= self.words.len() {
            return None;
        }

        let end = self
            .start
            .saturating_add(self.chunk_size)
            .min(self.words.len());
        let chunk = self.words[self.start..end].join(" ");
        self.start = self.start.saturating_add(self.stride);
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.words.len().saturating_sub(self.start);
        let n = remaining.div_ceil(self.stride);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Chunks<'_> {}

impl FusedIterator for Chunks<'_> {}
