//! Broker message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a message is published: straight to a queue, or to an exchange with
/// a routing key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Destination {
    Queue {
        name: String,
    },
    Exchange {
        name: String,
        #[serde(default)]
        routing_key: String,
    },
}

impl Destination {
    pub fn queue(name: impl Into<String>) -> Self {
        Destination::Queue { name: name.into() }
    }

    pub fn exchange(name: impl Into<String>, routing_key: impl Into<String>) -> Self {
        Destination::Exchange {
            name: name.into(),
            routing_key: routing_key.into(),
        }
    }
}

/// Human-readable form stored in the ledger.
impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Queue { name } => write!(f, "Queue: {}", name),
            Destination::Exchange { name, routing_key } if routing_key.is_empty() => {
                write!(f, "Exchange: {} (Routing: none)", name)
            }
            Destination::Exchange { name, routing_key } => {
                write!(f, "Exchange: {} (Routing: {})", name, routing_key)
            }
        }
    }
}

/// A single publish handed to the broker client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub destination: Destination,
    /// `None` publishes on the connection's default virtual host
    pub virtual_host: Option<String>,
    /// Payload, sent byte-for-byte
    pub payload: String,
    /// Publish as `application/json` instead of plain text
    pub as_json: bool,
}

impl PublishRequest {
    /// Build a request; an empty virtual host means the default one.
    pub fn new(
        destination: Destination,
        virtual_host: Option<String>,
        payload: impl Into<String>,
        as_json: bool,
    ) -> Self {
        Self {
            destination,
            virtual_host: virtual_host.filter(|vhost| !vhost.is_empty()),
            payload: payload.into(),
            as_json,
        }
    }
}

/// A message that was published without a local error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueueMessage {
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_host: Option<String>,
    pub content: String,
    pub is_json: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Destination::queue("orders"), "Queue: orders")]
    #[case(Destination::exchange("events", "user.created"), "Exchange: events (Routing: user.created)")]
    #[case(Destination::exchange("events", ""), "Exchange: events (Routing: none)")]
    fn test_destination_display(#[case] destination: Destination, #[case] expected: &str) {
        assert_eq!(destination.to_string(), expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("staging"), Some("staging"))]
    fn test_publish_request_empty_vhost_is_default(
        #[case] vhost: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let request = PublishRequest::new(
            Destination::queue("q"),
            vhost.map(str::to_string),
            "hello",
            false,
        );
        assert_eq!(request.virtual_host.as_deref(), expected);
    }

    #[rstest]
    fn test_destination_deserialize_exchange_without_routing_key() {
        let destination: Destination =
            serde_json::from_str(r#"{"kind": "exchange", "name": "events"}"#)
                .expect("Should deserialize");
        assert_eq!(destination, Destination::exchange("events", ""));
    }
}
