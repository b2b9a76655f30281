//! Catch-all handler serving mocked endpoints.

use crate::routes::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use mockapi_core::mocks::{Dispatch, MockResponse};
use mockapi_core::types::endpoint::DEFAULT_CONTENT_TYPE;
use std::sync::Arc;
use tracing::warn;

/// Serve any request from the registry.
///
/// The raw request path (no query string, not percent-decoded) and the method
/// are the lookup key. Unmatched requests get an empty 404.
pub async fn handle_mock(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    match state.dispatcher.dispatch(uri.path(), method.as_str()) {
        Dispatch::Match(mock) => into_http_response(mock),
        Dispatch::NoMatch => StatusCode::NOT_FOUND.into_response(),
    }
}

fn into_http_response(mock: MockResponse) -> Response {
    let status = u16::try_from(mock.status_code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or_else(|| {
            warn!(
                status_code = mock.status_code,
                "Stored status code is not a valid HTTP status, serving 500"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        });

    let content_type = HeaderValue::from_str(&mock.content_type).unwrap_or_else(|_| {
        warn!(
            content_type = %mock.content_type,
            "Stored content type is not a valid header value, serving default"
        );
        HeaderValue::from_static(DEFAULT_CONTENT_TYPE)
    });

    (status, [(header::CONTENT_TYPE, content_type)], mock.body).into_response()
}
