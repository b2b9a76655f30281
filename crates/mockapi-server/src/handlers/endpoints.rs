//! Admin handlers for mock endpoints.

use crate::errors::AdminError;
use crate::routes::AppState;
use axum::{extract::State, http::StatusCode, Json};
use mockapi_core::types::endpoint::{HttpMethod, MockEndpoint};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `POST /api/endpoints`.
///
/// `path` and `response` are trimmed before the endpoint is stored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEndpointRequest {
    pub path: String,
    pub method: String,
    pub status_code: i32,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl AddEndpointRequest {
    fn validate(&self) -> Result<(), AdminError> {
        if self.path.trim().is_empty() {
            return Err(AdminError::Validation("Path cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Body of `DELETE /api/endpoints`.
#[derive(Debug, Deserialize)]
pub struct EndpointKey {
    pub path: String,
    pub method: String,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

/// `GET /api/methods`
pub async fn list_methods() -> Json<Vec<&'static str>> {
    Json(HttpMethod::ALL.iter().map(HttpMethod::as_str).collect())
}

/// `GET /api/endpoints`
pub async fn list_endpoints(State(state): State<Arc<AppState>>) -> Json<Vec<MockEndpoint>> {
    Json(state.registry.list())
}

/// `POST /api/endpoints`
///
/// Replaces any endpoint with the same path and method.
pub async fn add_endpoint(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddEndpointRequest>,
) -> Result<(StatusCode, Json<MockEndpoint>), AdminError> {
    request.validate()?;

    let endpoint = MockEndpoint::new(
        request.path.trim(),
        request.method,
        request.status_code,
        request.response.trim(),
        request.content_type.as_deref(),
    );
    state.registry.insert(endpoint.clone());

    Ok((StatusCode::CREATED, Json(endpoint)))
}

/// `DELETE /api/endpoints`
pub async fn remove_endpoint(
    State(state): State<Arc<AppState>>,
    Json(key): Json<EndpointKey>,
) -> Result<StatusCode, AdminError> {
    if state.registry.remove(&key.path, &key.method) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AdminError::EndpointNotFound {
            path: key.path,
            method: key.method,
        })
    }
}

/// `DELETE /api/endpoints/all`
pub async fn clear_endpoints(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    Json(ClearResponse {
        cleared: state.registry.clear(),
    })
}
