//! Durable vector index backed by redb
//!
//! Records are keyed by chunk ID and hold the bincode-encoded text,
//! metadata and embedding. Search is an exact cosine scan.

use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::{Deserialize, Serialize};
use simsimd::SpatialSimilarity;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::providers::VectorMatch;
use crate::types::IndexedRecord;

const RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new("records");

#[derive(Serialize, Deserialize)]
struct StoredRecord {
    text: String,
    metadata: BTreeMap<String, String>,
    embedding: Vec<f32>,
}

/// On-disk vector index
pub struct VectorStore {
    /// Underlying database
    db: Database,
    /// Database file location
    path: PathBuf,
}

impl VectorStore {
    /// Open (or create) the index at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(&path).map_err(|e| Error::vector_db(e.to_string()))?;

        // Make sure read transactions always find the table
        let txn = db.begin_write().map_err(|e| Error::vector_db(e.to_string()))?;
        {
            txn.open_table(RECORDS)
                .map_err(|e| Error::vector_db(e.to_string()))?;
        }
        txn.commit().map_err(|e| Error::vector_db(e.to_string()))?;

        tracing::info!("Opened vector index at {}", path.display());

        Ok(Self { db, path })
    }

    /// Database file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or overwrite records in a single transaction
    pub fn upsert(&self, records: &[IndexedRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let txn = self
            .db
            .begin_write()
            .map_err(|e| Error::vector_db(e.to_string()))?;
        {
            let mut table = txn
                .open_table(RECORDS)
                .map_err(|e| Error::vector_db(e.to_string()))?;

            for record in records {
                let stored = StoredRecord {
                    text: record.text.clone(),
                    metadata: record.metadata.clone(),
                    embedding: record.embedding.clone(),
                };
                let bytes = bincode::serde::encode_to_vec(&stored, bincode::config::standard())
                    .map_err(|e| Error::vector_db(format!("Failed to encode record: {}", e)))?;

                table
                    .insert(record.id.as_str(), bytes.as_slice())
                    .map_err(|e| Error::vector_db(e.to_string()))?;
            }
        }
        txn.commit().map_err(|e| Error::vector_db(e.to_string()))?;

        tracing::debug!("Upserted {} records", records.len());
        Ok(())
    }

    /// Return up to `k` records ordered by descending cosine similarity
    pub fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<VectorMatch>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let txn = self
            .db
            .begin_read()
            .map_err(|e| Error::vector_db(e.to_string()))?;
        let table = txn
            .open_table(RECORDS)
            .map_err(|e| Error::vector_db(e.to_string()))?;

        let mut matches = Vec::new();

        for entry in table.iter().map_err(|e| Error::vector_db(e.to_string()))? {
            let (key, value) = entry.map_err(|e| Error::vector_db(e.to_string()))?;
            let (stored, _): (StoredRecord, usize) =
                bincode::serde::decode_from_slice(value.value(), bincode::config::standard())
                    .map_err(|e| Error::vector_db(format!("Corrupt record: {}", e)))?;

            let Some(distance) = <f32 as SpatialSimilarity>::cos(embedding, &stored.embedding) else {
                tracing::warn!(
                    "Skipping record {} with {} dimensions (query has {})",
                    key.value(),
                    stored.embedding.len(),
                    embedding.len()
                );
                continue;
            };

            let similarity = (1.0 - distance) as f32;

            matches.push(VectorMatch {
                id: key.value().to_string(),
                text: stored.text,
                metadata: stored.metadata,
                similarity: if similarity.is_nan() { 0.0 } else { similarity },
            });
        }

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        matches.truncate(k);

        Ok(matches)
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| Error::vector_db(e.to_string()))?;
        let table = txn
            .open_table(RECORDS)
            .map_err(|e| Error::vector_db(e.to_string()))?;

        let len = table.len().map_err(|e| Error::vector_db(e.to_string()))?;
        Ok(len as usize)
    }

    /// Check if empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
