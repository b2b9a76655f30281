//! Shared helpers for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use mockapi_core::mocks::Registry;
use mockapi_core::publish::{MessagePublisher, PublishError};
use mockapi_core::templates::TemplateCatalog;
use mockapi_core::types::message::PublishRequest;
use mockapi_core::types::template::TemplateCategory;
use mockapi_server::AppState;
use std::sync::{Arc, Mutex};

/// Broker client that records requests and can be told to fail.
#[derive(Default)]
pub struct StubPublisher {
    pub fail_with: Mutex<Option<PublishError>>,
    pub published: Mutex<Vec<PublishRequest>>,
}

#[async_trait]
impl MessagePublisher for StubPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<(), PublishError> {
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        self.published.lock().unwrap().push(request.clone());
        Ok(())
    }
}

pub fn state_with(
    publisher: Arc<StubPublisher>,
    categories: Vec<TemplateCategory>,
) -> Arc<AppState> {
    Arc::new(AppState::new(
        Arc::new(Registry::new()),
        publisher,
        Arc::new(TemplateCatalog::from_categories(categories)),
    ))
}

pub fn state() -> Arc<AppState> {
    state_with(Arc::new(StubPublisher::default()), Vec::new())
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
