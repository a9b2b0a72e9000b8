//! # tkv-api — Axum API Service for Tenant-Partitioned Records
//!
//! Exposes the five record operations over HTTP. Every operation is gated
//! by token validation before any body parsing or store access.
//!
//! ## API Surface
//!
//! | Path                  | Module                 | Auth |
//! |-----------------------|------------------------|------|
//! | `/v1/records/*`       | [`routes::records`]    | token gate |
//! | `/health/liveness`    | here                   | none |
//! | `/health/readiness`   | here                   | none |
//! | `/metrics`            | here                   | none |
//! | `/openapi.json`       | [`openapi`]            | none |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → BodyLimit → Handler
//!   → RecordService (gate → operation)
//! ```
//!
//! The token gate runs inside [`service::RecordService`], not as a
//! middleware layer.

pub mod error;
pub mod gate;
pub mod middleware;
pub mod openapi;
pub mod operations;
pub mod routes;
pub mod service;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Assemble the full application router with all routes and middleware.
///
/// Probes, metrics, and the OpenAPI document need no token.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::records::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer());

    let probes = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(prometheus_metrics))
        .merge(openapi::router());

    Router::new().merge(probes).merge(api).with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the record store answers.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.store.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "readiness check failed");
        AppError::ServiceUnavailable("record store unavailable".into())
    })?;
    Ok("ready")
}

/// Prometheus text exposition. 503 when metrics are disabled.
async fn prometheus_metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| AppError::ServiceUnavailable("metrics disabled".into()))
}
