//! # Prometheus Metrics
//!
//! Request metrics through the `metrics` facade, exported in Prometheus
//! text format by `metrics-exporter-prometheus`.
//!
//! | Metric | Labels | Recorded by |
//! |--------|--------|-------------|
//! | `tkv_http_requests_total` | `method`, `status` | [`metrics_middleware`] |
//! | `tkv_http_request_duration_seconds` | `method` | [`metrics_middleware`] |
//! | `tkv_requests_total` | `operation`, `status` | `RecordService` |
//! | `tkv_denied_total` | | `AuthorizedOperation` |
//!
//! The recorder is process-global, so it is installed once by the binary.
//! Without it, every macro call is a no-op.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder and return its render handle.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Middleware that counts requests and observes their latency.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    metrics::histogram!("tkv_http_request_duration_seconds", "method" => method.clone())
        .record(start.elapsed().as_secs_f64());
    metrics::counter!(
        "tkv_http_requests_total",
        "method" => method,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}
