//! Publish wrapper around an injected broker client.

use crate::publish::ledger::Ledger;
use crate::types::message::{PublishRequest, QueueMessage};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Error reported by a broker client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// The broker could not be reached or answered with an error
    #[error("Failed to send message to {destination}: {reason}")]
    Broker { destination: String, reason: String },
    /// The broker accepted the message but no queue received it
    #[error("Message to {destination} was not routed to any queue")]
    Unroutable { destination: String },
}

/// Broker client capability.
///
/// Implementations publish one message and report whether the call itself
/// succeeded. Connection management is the implementation's concern.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    async fn publish(&self, request: &PublishRequest) -> Result<(), PublishError>;
}

/// Publishes through a [`MessagePublisher`] and records successes in a
/// [`Ledger`].
///
/// A failed publish is returned to the caller and leaves the ledger untouched.
#[derive(Clone)]
pub struct PublishService {
    publisher: Arc<dyn MessagePublisher>,
    ledger: Arc<Ledger>,
}

impl PublishService {
    pub fn new(publisher: Arc<dyn MessagePublisher>, ledger: Arc<Ledger>) -> Self {
        Self { publisher, ledger }
    }

    pub async fn publish(&self, request: PublishRequest) -> Result<QueueMessage, PublishError> {
        let destination = request.destination.to_string();

        if let Err(err) = self.publisher.publish(&request).await {
            warn!(destination = %destination, error = %err, "Publish failed");
            return Err(err);
        }

        info!(
            destination = %destination,
            virtual_host = request.virtual_host.as_deref().unwrap_or("default"),
            as_json = request.as_json,
            "Message published"
        );
        Ok(self.ledger.record(
            &destination,
            request.virtual_host.as_deref(),
            &request.payload,
            request.as_json,
        ))
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }
}
