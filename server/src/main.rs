// Forbid unwrap() in production code to prevent panics on bad input.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::sync::Arc;

use server::{DatasetService, config::ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let service = Arc::new(DatasetService::new());

    let (addr, serve) = server::bind(config.socket_addr(), service)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {}: {e}", config.socket_addr());
            std::process::exit(1);
        });

    // Datasets live at http://<addr>/v1/datasets, queries at /v1/query
    tracing::info!("listening on {}", addr);

    serve.await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
