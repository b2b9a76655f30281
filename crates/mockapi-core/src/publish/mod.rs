//! Broker publishing and the ledger of sent messages.
//!
//! - [`Ledger`]: ordered, in-memory record of messages that were published
//! - [`PublishService`]: calls the broker client and records successes
//! - [`MessagePublisher`]: the broker client capability the service is given

pub mod ledger;
pub mod service;

pub use ledger::Ledger;
pub use service::{MessagePublisher, PublishError, PublishService};
