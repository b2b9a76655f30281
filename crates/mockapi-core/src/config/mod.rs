//! Template file parsing.

pub mod error;
pub mod parser;

pub use error::ConfigError;
