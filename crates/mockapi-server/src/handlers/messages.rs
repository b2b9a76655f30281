//! Admin handlers for broker messages.

use crate::errors::AdminError;
use crate::routes::AppState;
use axum::{extract::State, http::StatusCode, Json};
use mockapi_core::types::endpoint::DEFAULT_CONTENT_TYPE;
use mockapi_core::types::message::{Destination, PublishRequest, QueueMessage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `POST /api/messages`.
///
/// Text fields are trimmed. When both an exchange and a queue are given the
/// exchange wins.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishMessageRequest {
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub routing_key: Option<String>,
    #[serde(default)]
    pub virtual_host: Option<String>,
    pub message: String,
    /// `application/json` (the default) publishes as JSON, anything else as text
    #[serde(default)]
    pub content_type: Option<String>,
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

impl PublishMessageRequest {
    fn into_publish_request(self) -> Result<PublishRequest, AdminError> {
        let queue = trimmed(&self.queue);
        let exchange = trimmed(&self.exchange);
        let message = self.message.trim();

        if queue.is_empty() && exchange.is_empty() {
            return Err(AdminError::Validation(
                "Queue name or Exchange must be provided".to_string(),
            ));
        }
        if message.is_empty() {
            return Err(AdminError::Validation(
                "Message cannot be empty".to_string(),
            ));
        }

        let destination = if exchange.is_empty() {
            Destination::queue(queue)
        } else {
            Destination::exchange(exchange, trimmed(&self.routing_key))
        };
        let as_json = self
            .content_type
            .as_deref()
            .map_or(true, |ct| ct.trim() == DEFAULT_CONTENT_TYPE);

        Ok(PublishRequest::new(
            destination,
            Some(trimmed(&self.virtual_host).to_string()),
            message,
            as_json,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

/// `POST /api/messages`
///
/// Publishes through the broker client. Only successful publishes are added
/// to the ledger.
pub async fn publish_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PublishMessageRequest>,
) -> Result<(StatusCode, Json<QueueMessage>), AdminError> {
    let request = request.into_publish_request()?;
    let message = state.publisher.publish(request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// `GET /api/messages`
pub async fn list_messages(State(state): State<Arc<AppState>>) -> Json<Vec<QueueMessage>> {
    Json(state.ledger().list())
}

/// `DELETE /api/messages`
pub async fn clear_messages(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    Json(ClearResponse {
        cleared: state.ledger().clear(),
    })
}
