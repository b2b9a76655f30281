//! Mock endpoint types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content type used when none (or an empty one) is supplied.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP methods offered to operators when registering a mock.
///
/// The admin API lists these; the registry itself keys endpoints by the raw
/// method string and accepts others.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Every method, in the order the form offers them.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered canned response.
///
/// `(path, method)` identifies the endpoint. Neither is normalized: `/a` and
/// `/a/` are different endpoints, and so are `GET` and `get`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MockEndpoint {
    /// Request path, matched as an opaque string
    pub path: String,
    /// HTTP method, kept exactly as provided
    pub method: String,
    /// Status code to respond with (not validated)
    pub status_code: i32,
    /// Response body, returned verbatim
    pub response: String,
    /// Value of the `Content-Type` response header
    pub content_type: String,
}

impl MockEndpoint {
    /// Create an endpoint, falling back to [`DEFAULT_CONTENT_TYPE`] when
    /// `content_type` is `None` or empty.
    pub fn new(
        path: impl Into<String>,
        method: impl Into<String>,
        status_code: i32,
        response: impl Into<String>,
        content_type: Option<&str>,
    ) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            status_code,
            response: response.into(),
            content_type: content_type_or_default(content_type),
        }
    }
}

pub(crate) fn content_type_or_default(content_type: Option<&str>) -> String {
    match content_type {
        Some(ct) if !ct.is_empty() => ct.to_string(),
        _ => DEFAULT_CONTENT_TYPE.to_string(),
    }
}
