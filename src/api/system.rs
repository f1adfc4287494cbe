//! Liveness endpoint.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, HealthResponse};

/// `GET /health`
///
/// Answers `{"status":"UP"}` once the database responds.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    state.store().ping().await.map_err(|e| {
        ApiError::DatabaseError(format!("Health check failed: {e:#}"))
    })?;

    Ok(Json(HealthResponse { status: "UP" }))
}
