//! Endpoint template catalog.
//!
//! Templates are predefined endpoints grouped into categories and loaded from
//! one or more JSON / JSONC / YAML files. Each file holds a list of
//! categories; files matched by the same pattern are concatenated in path
//! order.

use crate::config::parser::{expand_pattern, load_file};
use crate::config::ConfigError;
use crate::mocks::registry::Registry;
use crate::types::endpoint::MockEndpoint;
use crate::types::template::{EndpointTemplate, TemplateCategory};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// How a template is picked inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateSelector {
    /// Position in the category
    Index(usize),
    /// Display label (see [`EndpointTemplate::label`])
    Label(String),
}

/// Catalog of template categories, reloadable from disk.
#[derive(Debug)]
pub struct TemplateCatalog {
    pattern: String,
    categories: RwLock<Vec<TemplateCategory>>,
}

impl TemplateCatalog {
    /// Catalog with fixed categories and no backing files.
    pub fn from_categories(categories: Vec<TemplateCategory>) -> Self {
        Self {
            pattern: String::new(),
            categories: RwLock::new(categories),
        }
    }

    /// Load every file matching `pattern` (a path or glob).
    ///
    /// A pattern that matches nothing gives an empty catalog.
    pub async fn load(pattern: &str) -> Result<Self, ConfigError> {
        let categories = read_categories(pattern).await?;
        Ok(Self {
            pattern: pattern.to_string(),
            categories: RwLock::new(categories),
        })
    }

    /// Re-read the files this catalog was loaded from.
    ///
    /// On error the current categories are kept. Returns the category count.
    pub async fn reload(&self) -> Result<usize, ConfigError> {
        if self.pattern.is_empty() {
            return Ok(self.categories.read().await.len());
        }
        let categories = read_categories(&self.pattern).await?;
        let count = categories.len();
        *self.categories.write().await = categories;
        Ok(count)
    }

    pub async fn categories(&self) -> Vec<TemplateCategory> {
        self.categories.read().await.clone()
    }

    /// Templates of the first category named `category`; empty if unknown.
    pub async fn templates_in(&self, category: &str) -> Vec<EndpointTemplate> {
        self.categories
            .read()
            .await
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.endpoints.clone())
            .unwrap_or_default()
    }

    /// Find a template inside a category.
    pub async fn find(
        &self,
        category: &str,
        selector: &TemplateSelector,
    ) -> Option<EndpointTemplate> {
        let templates = self.templates_in(category).await;
        match selector {
            TemplateSelector::Index(index) => templates.get(*index).cloned(),
            TemplateSelector::Label(label) => templates.into_iter().find(|t| &t.label() == label),
        }
    }

    /// Register a template as a mock endpoint.
    ///
    /// Returns the registered endpoint, or `None` if no template matched.
    pub async fn apply(
        &self,
        category: &str,
        selector: &TemplateSelector,
        registry: &Registry,
    ) -> Option<MockEndpoint> {
        let template = self.find(category, selector).await?;
        let endpoint = template.to_endpoint();
        registry.insert(endpoint.clone());
        info!(
            category = %category,
            method = %endpoint.method,
            path = %endpoint.path,
            "Template applied"
        );
        Some(endpoint)
    }
}

async fn read_categories(pattern: &str) -> Result<Vec<TemplateCategory>, ConfigError> {
    let paths = expand_pattern(pattern)?;
    if paths.is_empty() {
        warn!(pattern = %pattern, "No template files found, using empty catalog");
        return Ok(Vec::new());
    }

    let mut categories = Vec::new();
    for path in &paths {
        let mut loaded: Vec<TemplateCategory> = load_file(path).await?;
        categories.append(&mut loaded);
    }
    info!(
        files = paths.len(),
        categories = categories.len(),
        "Loaded template categories"
    );
    Ok(categories)
}
