//! Admin handlers for endpoint templates.

use crate::errors::AdminError;
use crate::routes::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use mockapi_core::templates::TemplateSelector;
use mockapi_core::types::endpoint::MockEndpoint;
use mockapi_core::types::template::{EndpointTemplate, TemplateCategory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `POST /api/templates/apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyTemplateRequest {
    pub category: String,
    /// Template index or label
    pub template: TemplateSelector,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub categories: usize,
}

/// `GET /api/templates`
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<TemplateCategory>> {
    Json(state.templates.categories().await)
}

/// `GET /api/templates/:category`
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Json<Vec<EndpointTemplate>> {
    Json(state.templates.templates_in(&category).await)
}

/// `POST /api/templates/reload`
pub async fn reload_templates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, AdminError> {
    let categories = state.templates.reload().await?;
    Ok(Json(ReloadResponse { categories }))
}

/// `POST /api/templates/apply`
///
/// Registers the selected template as a mock endpoint.
pub async fn apply_template(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApplyTemplateRequest>,
) -> Result<Json<MockEndpoint>, AdminError> {
    let applied = state
        .templates
        .apply(&request.category, &request.template, &state.registry)
        .await;
    applied
        .map(Json)
        .ok_or(AdminError::TemplateNotFound(request.category))
}
