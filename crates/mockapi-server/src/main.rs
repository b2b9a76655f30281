//! mockapi server
//!
//! Serves runtime-registered mock endpoints on one listener and the admin API
//! on another.

use mockapi_core::mocks::Registry;
use mockapi_core::templates::TemplateCatalog;
use mockapi_server::config::Config;
use mockapi_server::rabbitmq::RabbitMqPublisher;
use mockapi_server::{routes, AppState};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mockapi_server=debug,mockapi_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mockapi");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    info!(config = ?config, "Configuration loaded");

    let templates = TemplateCatalog::load(&config.templates)
        .await
        .map_err(|e| {
            error!("Failed to load templates: {}", e);
            e
        })?;

    let publisher = RabbitMqPublisher::new(&config.broker).map_err(|e| {
        error!("Failed to build broker client: {}", e);
        e
    })?;

    let state = Arc::new(AppState::new(
        Arc::new(Registry::new()),
        Arc::new(publisher),
        Arc::new(templates),
    ));

    let mock_app = routes::build_mock_routes(Arc::clone(&state));
    let admin_app = routes::build_admin_routes(state);

    let mock_listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    let admin_listener = tokio::net::TcpListener::bind(config.admin_bind_address).await?;
    info!("Mock endpoints listening on {}", config.bind_address);
    info!("Admin API listening on {}", config.admin_bind_address);

    let mock_server = async {
        axum::serve(mock_listener, mock_app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    };
    let admin_server = async {
        axum::serve(admin_listener, admin_app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    };
    tokio::try_join!(mock_server, admin_server)?;

    info!("mockapi shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, shutting down"),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, shutting down");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
