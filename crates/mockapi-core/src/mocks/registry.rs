//! Endpoint registry.
//!
//! `Registry` is the single store of mock endpoints. It is shared between the
//! request path (lookups on every inbound request) and the admin surface
//! (add/remove/list), so all operations take `&self` and synchronize
//! internally.

use crate::types::endpoint::MockEndpoint;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Endpoints by path, then by method. Keys are stored exactly as given.
type EndpointMap = HashMap<String, HashMap<String, MockEndpoint>>;

/// Thread-safe store of mock endpoints.
#[derive(Debug, Default)]
pub struct Registry {
    endpoints: RwLock<EndpointMap>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint, replacing any endpoint with the same path and
    /// method.
    ///
    /// `content_type` falls back to `application/json` when `None` or empty.
    /// Status code and method are stored as given.
    pub fn add(
        &self,
        path: &str,
        method: &str,
        status_code: i32,
        response: &str,
        content_type: Option<&str>,
    ) {
        self.insert(MockEndpoint::new(
            path,
            method,
            status_code,
            response,
            content_type,
        ));
    }

    /// Store an already built endpoint under its `(path, method)` key.
    pub fn insert(&self, endpoint: MockEndpoint) {
        info!(
            method = %endpoint.method,
            path = %endpoint.path,
            status_code = endpoint.status_code,
            "Mock endpoint registered"
        );
        let previous = self
            .write()
            .entry(endpoint.path.clone())
            .or_default()
            .insert(endpoint.method.clone(), endpoint);
        if let Some(previous) = previous {
            debug!(
                method = %previous.method,
                path = %previous.path,
                "Replaced existing mock endpoint"
            );
        }
    }

    /// Exact lookup by path and method.
    pub fn get(&self, path: &str, method: &str) -> Option<MockEndpoint> {
        self.read()
            .get(path)
            .and_then(|methods| methods.get(method))
            .cloned()
    }

    /// Remove the endpoint at `(path, method)`.
    ///
    /// Returns `true` only if an endpoint was actually removed.
    pub fn remove(&self, path: &str, method: &str) -> bool {
        let mut endpoints = self.write();
        let Some(methods) = endpoints.get_mut(path) else {
            return false;
        };
        let removed = methods.remove(method).is_some();
        if methods.is_empty() {
            endpoints.remove(path);
        }
        drop(endpoints);

        if removed {
            info!(method = %method, path = %path, "Mock endpoint removed");
        }
        removed
    }

    /// Snapshot of every endpoint, sorted by path then method.
    pub fn list(&self) -> Vec<MockEndpoint> {
        let mut endpoints: Vec<MockEndpoint> = self
            .read()
            .values()
            .flat_map(|methods| methods.values().cloned())
            .collect();
        endpoints.sort_by(|a, b| (&a.path, &a.method).cmp(&(&b.path, &b.method)));
        endpoints
    }

    /// Remove every endpoint and return how many were removed.
    pub fn clear(&self) -> usize {
        let mut endpoints = self.write();
        let cleared = count(&endpoints);
        endpoints.clear();
        drop(endpoints);

        info!(count = cleared, "Cleared all mock endpoints");
        cleared
    }

    pub fn len(&self) -> usize {
        count(&self.read())
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Each mutation is a single map operation, so a poisoned lock never
    // guards a half-applied change.
    fn read(&self) -> RwLockReadGuard<'_, EndpointMap> {
        self.endpoints.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EndpointMap> {
        self.endpoints.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn count(endpoints: &EndpointMap) -> usize {
    endpoints.values().map(HashMap::len).sum()
}
