//! API routes for the RAG server

pub mod ingest;
pub mod query;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/ingest",
            post(ingest::ingest_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/query", post(query::query_decision))
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "policy-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Policy document ingestion and claim decisions",
        "endpoints": {
            "POST /api/ingest": "Upload one PDF, DOCX or EML/MSG file for indexing",
            "POST /api/query": "Decide a claim query against indexed clauses",
            "GET /api/info": "Service information",
            "GET /health": "Liveness",
            "GET /ready": "Readiness"
        }
    }))
}
