//! # Remote Token Validator
//!
//! Asks an HTTP endpoint whether a token is valid.
//!
//! ```text
//! POST {validator_url}
//! {"token": "<token>"}
//!
//! 200 {"valid": true | false}
//! ```
//!
//! Verdict mapping:
//!
//! | Response                    | Result |
//! |-----------------------------|--------|
//! | 2xx with `{"valid": b}`     | `Ok(b)` |
//! | 401 / 403                   | `Ok(false)` |
//! | other 4xx, 5xx              | `Err(Upstream)` |
//! | 2xx with unreadable body    | `Err(Decode)` |
//! | transport failure / timeout | `Err(Http)` / `Err(Timeout)` |
//!
//! There is no retry. The caller treats every error as a rejection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ValidatorError;
use crate::TokenValidator;

#[derive(Serialize)]
struct ValidateRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct ValidateResponse {
    valid: bool,
}

/// [`TokenValidator`] backed by a remote validation endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenValidator {
    http: reqwest::Client,
    endpoint: Url,
    timeout_secs: u64,
}

impl HttpTokenValidator {
    /// Build a client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: Url, timeout_secs: u64) -> Result<Self, ValidatorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ValidatorError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            endpoint,
            timeout_secs,
        })
    }

    /// The endpoint this validator calls.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TokenValidator for HttpTokenValidator {
    async fn validate(&self, token: &str) -> Result<bool, ValidatorError> {
        let endpoint = self.endpoint.as_str();
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&ValidateRequest { token })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ValidatorError::Timeout {
                        endpoint: endpoint.to_string(),
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    ValidatorError::Http {
                        endpoint: endpoint.to_string(),
                        source: e,
                    }
                }
            })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(false);
        }
        if !status.is_success() {
            return Err(ValidatorError::Upstream {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body: ValidateResponse = resp.json().await.map_err(|e| ValidatorError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(body.valid)
    }
}
