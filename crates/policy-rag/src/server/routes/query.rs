//! Query endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::time::Instant;

use crate::server::state::AppState;
use crate::types::{Decision, QueryRequest};

/// POST /api/query - Decide a claim query.
///
/// Always answers with a decision; failures surface as an `error` verdict,
/// including bodies that are not a valid query request.
pub async fn query_decision(
    State(state): State<AppState>,
    request: Result<Json<QueryRequest>, JsonRejection>,
) -> Json<Decision> {
    tracing::info!("Incoming query");
    let start = Instant::now();
    let fallback_chars = state.config().reasoning.fallback_reason_chars;

    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected query body: {}", rejection.body_text());
            return Json(Decision::fallback(&rejection.body_text(), fallback_chars));
        }
    };

    let query = request.query.trim();
    if query.is_empty() {
        return Json(Decision::fallback("Query must not be empty", fallback_chars));
    }

    let decision = state.pipeline().answer(query, request.top_k).await;

    tracing::info!(
        "Query decided as '{}' in {}ms",
        decision.decision,
        start.elapsed().as_millis()
    );

    Json(decision)
}
