//! Mock endpoint management.
//!
//! - [`Registry`]: stores endpoints keyed by `(path, method)`
//! - [`Dispatcher`]: resolves an inbound request to a stored response

pub mod dispatcher;
pub mod registry;

pub use dispatcher::{Dispatch, Dispatcher, ExactMatch, MatchPolicy, MockResponse};
pub use registry::Registry;
