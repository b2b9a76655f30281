//! Health check handler.

use crate::routes::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub endpoints: usize,
    pub messages: usize,
}

/// `GET /health`
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        endpoints: state.registry.len(),
        messages: state.ledger().len(),
    })
}
