//! Request dispatch.
//!
//! `Dispatcher` turns an inbound `(path, method)` into either a stored
//! response or a not-found signal. It knows nothing about HTTP framing; the
//! transport writes the response out. Which endpoint a request resolves to is
//! decided by a [`MatchPolicy`], so matching rules can change without touching
//! storage or the transport binding.

use crate::mocks::registry::Registry;
use crate::types::endpoint::MockEndpoint;
use std::sync::Arc;
use tracing::debug;

/// Response instruction for a matched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status_code: i32,
    pub body: String,
    pub content_type: String,
}

impl From<MockEndpoint> for MockResponse {
    fn from(endpoint: MockEndpoint) -> Self {
        Self {
            status_code: endpoint.status_code,
            body: endpoint.response,
            content_type: endpoint.content_type,
        }
    }
}

/// Outcome of dispatching a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A registered endpoint matched; write it out unmodified
    Match(MockResponse),
    /// Nothing matched; the transport decides what a not-found looks like
    NoMatch,
}

/// Strategy for resolving a request against the registry.
pub trait MatchPolicy: Send + Sync {
    fn resolve(&self, registry: &Registry, path: &str, method: &str) -> Option<MockEndpoint>;
}

/// Path and method must both equal a registered key, byte for byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl MatchPolicy for ExactMatch {
    fn resolve(&self, registry: &Registry, path: &str, method: &str) -> Option<MockEndpoint> {
        registry.get(path, method)
    }
}

/// Resolves inbound requests against a shared [`Registry`].
#[derive(Debug, Clone)]
pub struct Dispatcher<P = ExactMatch> {
    registry: Arc<Registry>,
    policy: P,
}

impl Dispatcher<ExactMatch> {
    /// Dispatcher with exact `(path, method)` matching.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_policy(registry, ExactMatch)
    }
}

impl<P: MatchPolicy> Dispatcher<P> {
    pub fn with_policy(registry: Arc<Registry>, policy: P) -> Self {
        Self { registry, policy }
    }

    /// Resolve a request. Performs a single policy lookup; no fallbacks.
    pub fn dispatch(&self, path: &str, method: &str) -> Dispatch {
        match self.policy.resolve(&self.registry, path, method) {
            Some(endpoint) => {
                debug!(
                    method = %method,
                    path = %path,
                    status_code = endpoint.status_code,
                    "Mock matched"
                );
                Dispatch::Match(endpoint.into())
            }
            None => {
                debug!(method = %method, path = %path, "No mock matched");
                Dispatch::NoMatch
            }
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[fixture]
    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(Registry::new()))
    }

    #[rstest]
    fn test_dispatch_match_returns_stored_fields(dispatcher: Dispatcher) {
        dispatcher.registry().add(
            "/api/test",
            "GET",
            201,
            "{\"ok\":true}",
            Some("application/json"),
        );

        assert_eq!(
            dispatcher.dispatch("/api/test", "GET"),
            Dispatch::Match(MockResponse {
                status_code: 201,
                body: "{\"ok\":true}".to_string(),
                content_type: "application/json".to_string(),
            })
        );
    }

    #[rstest]
    fn test_dispatch_other_method_is_no_match(dispatcher: Dispatcher) {
        dispatcher
            .registry()
            .add("/api/test", "GET", 201, "{\"ok\":true}", None);

        assert_eq!(dispatcher.dispatch("/api/test", "POST"), Dispatch::NoMatch);
    }

    #[rstest]
    fn test_dispatch_replace_then_remove_scenario(dispatcher: Dispatcher) {
        let registry = dispatcher.registry().clone();
        registry.add("/x", "GET", 200, "a", None);
        registry.add("/x", "GET", 404, "b", None);

        match dispatcher.dispatch("/x", "GET") {
            Dispatch::Match(response) => {
                assert_eq!(response.status_code, 404);
                assert_eq!(response.body, "b");
            }
            Dispatch::NoMatch => panic!("Expected a match"),
        }

        assert!(registry.remove("/x", "GET"));
        assert_eq!(dispatcher.dispatch("/x", "GET"), Dispatch::NoMatch);
    }

    #[rstest]
    fn test_dispatch_sees_registry_updates(dispatcher: Dispatcher) {
        assert_eq!(dispatcher.dispatch("/late", "PUT"), Dispatch::NoMatch);
        dispatcher.registry().add("/late", "PUT", 200, "", None);
        assert!(matches!(
            dispatcher.dispatch("/late", "PUT"),
            Dispatch::Match(_)
        ));
    }

    struct CountingPolicy(AtomicUsize);

    impl MatchPolicy for CountingPolicy {
        fn resolve(&self, registry: &Registry, path: &str, method: &str) -> Option<MockEndpoint> {
            self.0.fetch_add(1, Ordering::SeqCst);
            registry.get(path, method)
        }
    }

    #[rstest]
    fn test_dispatch_resolves_once_per_call() {
        let dispatcher = Dispatcher::with_policy(
            Arc::new(Registry::new()),
            CountingPolicy(AtomicUsize::new(0)),
        );

        dispatcher.dispatch("/a", "GET");
        dispatcher.dispatch("/b", "POST");

        assert_eq!(dispatcher.policy.0.load(Ordering::SeqCst), 2);
    }
}
