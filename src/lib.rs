pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use logic::{Catalog, CatalogError, CatalogResult, MAX_RESULTS};

// Export all model types
pub use model::*;

// Export seed module
pub use seed::*;

// Export store types
pub use store::{BreedStore, MemoryStore, PostgresStore, StoreError};

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppConfig, StoreBackend};

/// Connect the configured store and serve the API until a shutdown signal arrives
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    match config.database.backend {
        StoreBackend::Memory => {
            log::info!("Using in-memory breed store");
            serve_catalog(Catalog::new(MemoryStore::new()), config).await
        }
        StoreBackend::Postgres => {
            let database_name = config.database_name();
            log::info!("Connecting to PostgreSQL database {}", database_name);
            let store = PostgresStore::new(
                &config.database_url(),
                &database_name,
                config.database.max_connections,
            )
            .await
            .context("Failed to connect to the breed store")?;

            store.migrate().await.context("Failed to prepare breed table")?;

            let result = serve_catalog(Catalog::new(store.clone()), config).await;
            store.close().await;
            log::info!("Database connections closed");
            result
        }
    }
}

async fn serve_catalog<S: BreedStore + 'static>(
    catalog: Catalog<S>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let app = api::routes::create_router().with_state(Arc::new(catalog));

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    log::info!("Dog Breeds API running on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received Ctrl-C, shutting down"),
        _ = terminate => log::info!("Received SIGTERM, shutting down"),
    }
}
