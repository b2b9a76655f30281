//! Endpoint template types.

use crate::types::endpoint::{content_type_or_default, MockEndpoint};
use serde::{Deserialize, Serialize};

/// A predefined endpoint the operator can load into the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointTemplate {
    /// Display name; the menu falls back to `METHOD path (status)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
    pub method: String,
    pub status_code: i32,
    #[serde(default)]
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl EndpointTemplate {
    /// Label shown for this template.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{} {} ({})", self.method, self.path, self.status_code),
        }
    }

    pub fn to_endpoint(&self) -> MockEndpoint {
        MockEndpoint {
            path: self.path.clone(),
            method: self.method.clone(),
            status_code: self.status_code,
            response: self.response.clone(),
            content_type: content_type_or_default(self.content_type.as_deref()),
        }
    }
}

/// A named group of templates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateCategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<EndpointTemplate>,
}
