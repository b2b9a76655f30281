//! HTTP routers and shared application state.

use crate::handlers;
use axum::{
    routing::{delete, get, post},
    Router,
};
use mockapi_core::mocks::{Dispatcher, Registry};
use mockapi_core::publish::{Ledger, MessagePublisher, PublishService};
use mockapi_core::templates::TemplateCatalog;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Services shared by all handlers. One instance per process.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub dispatcher: Dispatcher,
    pub publisher: PublishService,
    pub templates: Arc<TemplateCatalog>,
}

impl AppState {
    pub fn new(
        registry: Arc<Registry>,
        publisher: Arc<dyn MessagePublisher>,
        templates: Arc<TemplateCatalog>,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&registry)),
            publisher: PublishService::new(publisher, Arc::new(Ledger::new())),
            registry,
            templates,
        }
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        self.publisher.ledger()
    }
}

/// Router serving mocked endpoints.
///
/// Every path and method goes to the dispatcher; there are no fixed routes,
/// so any path can be mocked.
pub fn build_mock_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(handlers::mock::handle_mock)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Router serving the admin API.
///
/// - `/health`
/// - `/api/endpoints` - list, add, remove, clear mock endpoints
/// - `/api/methods` - methods offered when registering an endpoint
/// - `/api/templates` - list, reload, apply templates
/// - `/api/messages` - publish, list, clear broker messages
pub fn build_admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/endpoints",
            get(handlers::endpoints::list_endpoints)
                .post(handlers::endpoints::add_endpoint)
                .delete(handlers::endpoints::remove_endpoint),
        )
        .route("/api/methods", get(handlers::endpoints::list_methods))
        .route(
            "/api/endpoints/all",
            delete(handlers::endpoints::clear_endpoints),
        )
        .route("/api/templates", get(handlers::templates::list_categories))
        .route(
            "/api/templates/reload",
            post(handlers::templates::reload_templates),
        )
        .route(
            "/api/templates/apply",
            post(handlers::templates::apply_template),
        )
        .route(
            "/api/templates/:category",
            get(handlers::templates::list_templates),
        )
        .route(
            "/api/messages",
            get(handlers::messages::list_messages)
                .post(handlers::messages::publish_message)
                .delete(handlers::messages::clear_messages),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
