//! RabbitMQ broker client over the management HTTP API.
//!
//! Publishes with `POST /api/exchanges/{vhost}/{exchange}/publish`. Queue
//! publishes go through the default exchange with the queue name as routing
//! key, which is how AMQP addresses a queue directly.

use crate::config::BrokerConfig;
use async_trait::async_trait;
use mockapi_core::publish::{MessagePublisher, PublishError};
use mockapi_core::types::message::{Destination, PublishRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name the management API uses for the nameless default exchange.
const DEFAULT_EXCHANGE: &str = "amq.default";

#[derive(Debug, Serialize)]
struct PublishBody<'a> {
    properties: MessageProperties,
    routing_key: &'a str,
    payload: &'a str,
    payload_encoding: &'static str,
}

#[derive(Debug, Serialize)]
struct MessageProperties {
    content_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_encoding: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    routed: bool,
}

/// [`MessagePublisher`] backed by the RabbitMQ management API.
#[derive(Debug, Clone)]
pub struct RabbitMqPublisher {
    client: reqwest::Client,
    management_url: String,
    username: String,
    password: String,
    default_vhost: String,
}

impl RabbitMqPublisher {
    pub fn new(config: &BrokerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            management_url: config.management_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            default_vhost: config.default_vhost.clone(),
        })
    }

    fn publish_url(&self, vhost: &str, exchange: &str) -> String {
        format!(
            "{}/api/exchanges/{}/{}/publish",
            self.management_url,
            urlencoding::encode(vhost),
            urlencoding::encode(exchange)
        )
    }
}

#[async_trait]
impl MessagePublisher for RabbitMqPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<(), PublishError> {
        let destination = request.destination.to_string();
        let broker_error = |reason: String| PublishError::Broker {
            destination: destination.clone(),
            reason,
        };

        let (exchange, routing_key) = match &request.destination {
            Destination::Queue { name } => (DEFAULT_EXCHANGE, name.as_str()),
            Destination::Exchange { name, routing_key } => (name.as_str(), routing_key.as_str()),
        };
        let vhost = request
            .virtual_host
            .as_deref()
            .unwrap_or(&self.default_vhost);

        let properties = if request.as_json {
            MessageProperties {
                content_type: "application/json",
                content_encoding: Some("UTF-8"),
            }
        } else {
            MessageProperties {
                content_type: "text/plain",
                content_encoding: None,
            }
        };
        let body = PublishBody {
            properties,
            routing_key,
            payload: &request.payload,
            payload_encoding: "string",
        };

        let url = self.publish_url(vhost, exchange);
        debug!(url = %url, routing_key = %routing_key, "Publishing via management API");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| broker_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(broker_error(format!("{}: {}", status, text)));
        }

        let outcome: PublishResponse = response
            .json()
            .await
            .map_err(|e| broker_error(format!("unexpected response: {}", e)))?;
        if !outcome.routed {
            return Err(PublishError::Unroutable { destination });
        }

        Ok(())
    }
}
