//! HTTP transport and admin API for mockapi.
//!
//! Two routers share one [`AppState`]:
//! - the mock router sends every request to the dispatcher
//! - the admin router manages endpoints, templates and broker messages

pub mod config;
pub mod errors;
pub mod handlers;
pub mod rabbitmq;
pub mod routes;

pub use routes::AppState;
