use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use catalog_core::config::{seed_file_from_env_value, store_backend_from_env_values};
use catalog_core::{CatalogConfig, CatalogService, open_store};

/// Main entry point for the catalog service
///
/// Resolves configuration once, opens the document store, and serves the REST API until
/// Ctrl-C. The store handle is closed after the server drains.
///
/// # Environment Variables
/// - `CATALOG_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `MONGO_URI`: MongoDB connection string; unset or blank uses the in-memory store
/// - `CATALOG_DATABASE`: MongoDB database name (default: "rare_diseases")
/// - `CATALOG_SEED_FILE`: JSON dataset for `/api/seed_data` (default: the embedded dataset)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, store connection, or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("catalog=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("CATALOG_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:5000".into())
        .parse()?;

    let store_backend = store_backend_from_env_values(
        std::env::var("MONGO_URI").ok(),
        std::env::var("CATALOG_DATABASE").ok(),
    )?;
    let seed_file = seed_file_from_env_value(std::env::var("CATALOG_SEED_FILE").ok());
    let cfg = CatalogConfig::new(store_backend, seed_file)?;

    let store = open_store(cfg.store_backend()).await?;
    let catalog = CatalogService::new(Arc::clone(&store), &cfg);

    tracing::info!(
        "++ Starting catalog REST on {} ({} store)",
        rest_addr,
        catalog.backend_name()
    );

    let app = api_rest::router(AppState::new(catalog.clone()));
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Shutting down, closing {} store", catalog.backend_name());
    catalog.close().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
