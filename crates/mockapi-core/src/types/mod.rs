//! Core domain types for endpoints, messages, and templates.

pub mod endpoint;
pub mod message;
pub mod template;
