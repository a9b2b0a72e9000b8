//! # Authorization Gate
//!
//! Every record operation runs behind [`AuthorizedOperation`]. The gate
//! consults the [`TokenValidator`] once and only then polls the operation.
//! A denied request never reaches body parsing or the store.
//!
//! ## Verdicts
//!
//! | Token                         | Validator call | Verdict |
//! |-------------------------------|----------------|---------|
//! | absent, empty, or whitespace  | none           | Denied  |
//! | present, validator `Ok(true)` | one            | Authorized |
//! | present, validator `Ok(false)`| one            | Denied  |
//! | present, validator `Err(_)`   | one            | Denied  |
//!
//! There is no retry and no caching. Tokens are never logged.

use std::future::Future;
use std::sync::Arc;

use axum::http::{header, HeaderMap};
use tkv_auth::TokenValidator;
use tkv_core::OperationError;

/// Outcome of the token check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The operation may run.
    Authorized,
    /// The request gets a fixed Forbidden response.
    Denied,
}

/// Token gate shared by all five operations.
#[derive(Clone)]
pub struct AuthorizedOperation {
    validator: Arc<dyn TokenValidator>,
}

impl std::fmt::Debug for AuthorizedOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedOperation").finish_non_exhaustive()
    }
}

impl AuthorizedOperation {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }

    /// Decide whether a request carrying `token` may proceed.
    pub async fn authorize(&self, token: Option<&str>) -> Authorization {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            tracing::warn!("request denied: missing token");
            return Authorization::Denied;
        };

        match self.validator.validate(token).await {
            Ok(true) => Authorization::Authorized,
            Ok(false) => {
                tracing::warn!("request denied: token rejected");
                Authorization::Denied
            }
            Err(e) => {
                tracing::warn!(error = %e, "request denied: token validator unavailable");
                Authorization::Denied
            }
        }
    }

    /// Run `op` only if `token` is authorized.
    ///
    /// `op` is not called, let alone polled, on a denied request.
    pub async fn run<T, F, Fut>(&self, token: Option<&str>, op: F) -> Result<T, OperationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, OperationError>>,
    {
        match self.authorize(token).await {
            Authorization::Authorized => op().await,
            Authorization::Denied => {
                metrics::counter!("tkv_denied_total").increment(1);
                Err(OperationError::Forbidden)
            }
        }
    }
}

/// Token carried by the `Authorization` header.
///
/// A `Bearer` scheme is stripped when present, matched case-insensitively;
/// otherwise the whole value is the token. A non-UTF-8 header counts as
/// absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => Some(value),
    }
}
