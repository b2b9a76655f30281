//! Core library for the mockapi server.
//!
//! - [`mocks`]: endpoint registry and request dispatch
//! - [`publish`]: broker publish wrapper and the ledger of sent messages
//! - [`templates`]: predefined endpoint templates loaded from files
//! - [`config`]: JSON / JSONC / YAML file parsing

pub mod config;
pub mod mocks;
pub mod publish;
pub mod templates;
pub mod types;
