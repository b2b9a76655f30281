//! Server configuration.
//!
//! Configuration is loaded from environment variables. The broker password is
//! redacted in Debug output.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Default mock listener address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default admin listener address.
pub const DEFAULT_ADMIN_BIND_ADDRESS: &str = "127.0.0.1:8081";

/// Default template file (path or glob).
pub const DEFAULT_TEMPLATES: &str = "templates.json";

/// Default RabbitMQ management API base URL.
pub const DEFAULT_RABBITMQ_MANAGEMENT_URL: &str = "http://localhost:15672";

/// Default broker request timeout in seconds.
pub const DEFAULT_RABBITMQ_TIMEOUT_SECONDS: u64 = 10;

/// Server configuration.
#[derive(Clone)]
pub struct Config {
    /// Address serving mocked endpoints (default: "0.0.0.0:8080").
    pub bind_address: SocketAddr,

    /// Address serving the admin API (default: "127.0.0.1:8081").
    pub admin_bind_address: SocketAddr,

    /// Template file path or glob pattern.
    pub templates: String,

    /// Broker connection settings.
    pub broker: BrokerConfig,
}

/// RabbitMQ management API settings.
#[derive(Clone)]
pub struct BrokerConfig {
    pub management_url: String,
    pub username: String,
    pub password: String,
    /// Virtual host used when a publish does not name one.
    pub default_vhost: String,
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("admin_bind_address", &self.admin_bind_address)
            .field("templates", &self.templates)
            .field("broker", &self.broker)
            .finish()
    }
}

impl fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("management_url", &self.management_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("default_vhost", &self.default_vhost)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid bind address in {var}: {reason}")]
    InvalidBindAddress { var: &'static str, reason: String },

    #[error("Invalid broker timeout: {0}")]
    InvalidTimeout(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = parse_address(vars, "MOCKAPI_BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?;
        let admin_bind_address = parse_address(
            vars,
            "MOCKAPI_ADMIN_BIND_ADDRESS",
            DEFAULT_ADMIN_BIND_ADDRESS,
        )?;

        let templates = vars
            .get("MOCKAPI_TEMPLATES")
            .cloned()
            .unwrap_or_else(|| DEFAULT_TEMPLATES.to_string());

        let management_url = vars
            .get("RABBITMQ_MANAGEMENT_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_RABBITMQ_MANAGEMENT_URL.to_string());

        let username = vars
            .get("RABBITMQ_USERNAME")
            .cloned()
            .unwrap_or_else(|| "guest".to_string());

        let password = vars
            .get("RABBITMQ_PASSWORD")
            .cloned()
            .unwrap_or_else(|| "guest".to_string());

        let default_vhost = vars
            .get("RABBITMQ_DEFAULT_VHOST")
            .filter(|vhost| !vhost.is_empty())
            .cloned()
            .unwrap_or_else(|| "/".to_string());

        let timeout_seconds = if let Some(value_str) = vars.get("RABBITMQ_TIMEOUT_SECONDS") {
            let value: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidTimeout(format!(
                    "RABBITMQ_TIMEOUT_SECONDS must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidTimeout(
                    "RABBITMQ_TIMEOUT_SECONDS must be greater than 0".to_string(),
                ));
            }

            value
        } else {
            DEFAULT_RABBITMQ_TIMEOUT_SECONDS
        };

        Ok(Config {
            bind_address,
            admin_bind_address,
            templates,
            broker: BrokerConfig {
                management_url,
                username,
                password,
                default_vhost,
                timeout: Duration::from_secs(timeout_seconds),
            },
        })
    }
}

fn parse_address(
    vars: &HashMap<String, String>,
    var: &'static str,
    default: &str,
) -> Result<SocketAddr, ConfigError> {
    let value = vars.get(var).map(String::as_str).unwrap_or(default);
    value
        .parse()
        .map_err(|e| ConfigError::InvalidBindAddress {
            var,
            reason: format!("'{}': {}", value, e),
        })
}
