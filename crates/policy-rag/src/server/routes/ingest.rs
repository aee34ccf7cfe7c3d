//! Document ingestion endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::IngestResponse;

/// POST /api/ingest - Upload and index one file (the first file field)
pub async fn ingest_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>> {
    let start = Instant::now();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidRequest(format!("Failed to read file: {}", e)))?;

        tracing::info!("Processing file: {} ({} bytes)", filename, data.len());

        let report = state.pipeline().ingest(data, &filename).await?;
        let elapsed = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexed {} chunks from {} in {}ms",
            report.chunks_indexed(),
            filename,
            elapsed
        );

        return Ok(Json(IngestResponse::indexed(
            report.filename,
            report.chunk_ids.len(),
            elapsed,
        )));
    }

    Err(Error::InvalidRequest(
        "multipart body contains no file field".to_string(),
    ))
}
