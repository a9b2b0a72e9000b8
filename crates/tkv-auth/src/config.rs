//! Validator configuration.
//!
//! Variables:
//! - `TKV_VALIDATOR_URL` — remote validation endpoint. When set, the HTTP
//!   validator is used and `TKV_STATIC_TOKENS` is ignored.
//! - `TKV_VALIDATOR_TIMEOUT_SECS` (default: 5)
//! - `TKV_STATIC_TOKENS` — comma-separated accepted tokens.
//!
//! With neither URL nor tokens, the static validator is empty and every
//! request is denied.

use std::sync::Arc;

use url::Url;
use zeroize::Zeroizing;

use crate::error::ValidatorError;
use crate::http::HttpTokenValidator;
use crate::static_tokens::StaticTokenValidator;
use crate::TokenValidator;

const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Where token verdicts come from.
///
/// Custom `Debug` redacts the static tokens.
#[derive(Clone)]
pub struct ValidatorConfig {
    /// Remote validation endpoint.
    pub url: Option<Url>,
    /// Remote request timeout in seconds.
    pub timeout_secs: u64,
    /// Comma-separated accepted tokens, used when `url` is `None`.
    pub static_tokens: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorConfig")
            .field("url", &self.url.as_ref().map(Url::as_str))
            .field("timeout_secs", &self.timeout_secs)
            .field("static_tokens", &self.static_tokens.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            static_tokens: None,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ValidatorError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidatorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = match lookup("TKV_VALIDATOR_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(Url::parse(raw.trim()).map_err(|e| {
                ValidatorError::Config(format!("invalid URL for TKV_VALIDATOR_URL: {e}"))
            })?),
            None => None,
        };
        let timeout_secs = lookup("TKV_VALIDATOR_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let static_tokens = lookup("TKV_STATIC_TOKENS").map(Zeroizing::new);

        Ok(Self {
            url,
            timeout_secs,
            static_tokens,
        })
    }

    /// Construct the configured validator.
    pub fn build(&self) -> Result<Arc<dyn TokenValidator>, ValidatorError> {
        if let Some(url) = &self.url {
            let validator = HttpTokenValidator::new(url.clone(), self.timeout_secs)?;
            tracing::info!(
                endpoint = %validator.endpoint(),
                timeout_secs = self.timeout_secs,
                "Using remote token validator"
            );
            return Ok(Arc::new(validator));
        }

        let validator = self
            .static_tokens
            .as_deref()
            .map(|raw| StaticTokenValidator::from_csv(raw))
            .unwrap_or_default();
        if validator.is_empty() {
            tracing::warn!("No tokens configured. Every record request will be denied.");
        } else {
            tracing::info!(tokens = validator.len(), "Using static token validator");
        }
        Ok(Arc::new(validator))
    }
}
