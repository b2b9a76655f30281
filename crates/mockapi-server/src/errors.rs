//! Admin API error types.
//!
//! Every error maps to a status code and a `{"error": "..."}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mockapi_core::config::ConfigError;
use mockapi_core::publish::PublishError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Admin API error.
///
/// - Validation: 400 Bad Request, nothing was changed
/// - EndpointNotFound, TemplateNotFound: 404 Not Found
/// - Publish: 502 Bad Gateway, the broker call failed and nothing was recorded
/// - Templates: 500 Internal Server Error
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{0}")]
    Validation(String),

    #[error("Mock endpoint not found: {method} {path}")]
    EndpointNotFound { path: String, method: String },

    #[error("Template not found in category '{0}'")]
    TemplateNotFound(String),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("Failed to load templates: {0}")]
    Templates(#[from] ConfigError),
}

impl AdminError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Validation(_) => StatusCode::BAD_REQUEST,
            AdminError::EndpointNotFound { .. } | AdminError::TemplateNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AdminError::Publish(_) => StatusCode::BAD_GATEWAY,
            AdminError::Templates(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Admin request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
