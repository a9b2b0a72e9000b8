//! # tkv-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the record service.
//! Binds to configurable port (default 8080).

use std::sync::Arc;

use tkv_api::state::{AppConfig, AppState, LogFormat};
use tkv_auth::ValidatorConfig;
use tkv_store::{MemoryRecordStore, PgConfig, PgRecordStore, RecordStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Initialize structured tracing.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    // Record store: Postgres when DATABASE_URL is set, in-memory otherwise.
    let store: Arc<dyn RecordStore> = match PgConfig::from_env() {
        Some(pg) => {
            let store = PgRecordStore::connect(&pg).await.map_err(|e| {
                tracing::error!("Database initialization failed: {e}");
                e
            })?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Records are kept in memory and lost on restart.");
            Arc::new(MemoryRecordStore::new())
        }
    };

    let validator = ValidatorConfig::from_env()
        .and_then(|v| v.build())
        .map_err(|e| {
            tracing::error!("Token validator initialization failed: {e}");
            e
        })?;

    let mut state = AppState::new(validator, store, config.clone());
    if config.metrics_enabled {
        let handle = tkv_api::middleware::metrics::install_recorder()?;
        state = state.with_metrics(handle);
    }

    tracing::info!(
        create_policy = config.create_policy.as_str(),
        metrics = config.metrics_enabled,
        "Record service configured"
    );

    let app = tkv_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("tkv API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
