//! HTTP request handlers.

pub mod endpoints;
pub mod health;
pub mod messages;
pub mod mock;
pub mod templates;
