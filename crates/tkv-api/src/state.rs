//! # Application State
//!
//! Shared state for the Axum application: the record service, a handle to
//! the store for readiness probes, and the optional Prometheus handle.
//!
//! [`AppConfig`] holds the service settings read from the environment.
//! Store and validator settings live with their crates
//! ([`tkv_store::PgConfig`], [`tkv_auth::ValidatorConfig`]).

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tkv_auth::TokenValidator;
use tkv_store::RecordStore;

use crate::operations::CreatePolicy;
use crate::service::RecordService;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid TKV_CREATE_POLICY: {0}")]
    InvalidCreatePolicy(String),
    #[error("invalid TKV_LOG_FORMAT \"{0}\", expected text or json")]
    InvalidLogFormat(String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// Behavior of Create on an occupied key.
    pub create_policy: CreatePolicy,
    /// Install the Prometheus recorder and serve `/metrics`.
    pub metrics_enabled: bool,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            create_policy: CreatePolicy::Reject,
            metrics_enabled: true,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `TKV_CREATE_POLICY` — `reject` or `upsert` (default: `reject`)
    /// - `TKV_METRICS_ENABLED` (default: `true`)
    /// - `TKV_LOG_FORMAT` — `text` or `json` (default: `text`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };
        let create_policy = match lookup("TKV_CREATE_POLICY") {
            Some(raw) => raw.parse().map_err(ConfigError::InvalidCreatePolicy)?,
            None => defaults.create_policy,
        };
        let metrics_enabled = lookup("TKV_METRICS_ENABLED")
            .map(|v| {
                let v = v.trim().to_ascii_lowercase();
                !matches!(v.as_str(), "false" | "0" | "no" | "off")
            })
            .unwrap_or(defaults.metrics_enabled);
        let log_format = match lookup("TKV_LOG_FORMAT").map(|v| v.trim().to_ascii_lowercase()) {
            None => defaults.log_format,
            Some(v) if v == "text" => LogFormat::Text,
            Some(v) if v == "json" => LogFormat::Json,
            Some(other) => return Err(ConfigError::InvalidLogFormat(other)),
        };

        Ok(Self {
            port,
            create_policy,
            metrics_enabled,
            log_format,
        })
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: RecordService,
    pub store: Arc<dyn RecordStore>,
    pub metrics: Option<PrometheusHandle>,
    pub config: AppConfig,
}

impl AppState {
    /// Wire the service from its collaborators.
    pub fn new(
        validator: Arc<dyn TokenValidator>,
        store: Arc<dyn RecordStore>,
        config: AppConfig,
    ) -> Self {
        Self {
            service: RecordService::new(validator, store.clone(), config.create_policy),
            store,
            metrics: None,
            config,
        }
    }

    /// Serve `handle` at `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
