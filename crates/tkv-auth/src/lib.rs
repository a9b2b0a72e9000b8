//! # tkv-auth — Token Validation
//!
//! The record service treats token validation as a black box:
//! `token -> valid | invalid`. This crate defines that capability as the
//! [`TokenValidator`] trait and ships two implementations:
//!
//! - [`StaticTokenValidator`] — a fixed set of accepted tokens, compared in
//!   constant time. Secrets are zeroized on drop.
//! - [`HttpTokenValidator`] — asks a remote endpoint over HTTP.
//!
//! [`ValidatorConfig`] reads the environment and builds the right one.
//!
//! Callers never see why a token was rejected. Any [`ValidatorError`] is
//! treated as a rejection by the gate in `tkv-api`.

pub mod config;
pub mod error;
pub mod http;
pub mod static_tokens;

pub use config::ValidatorConfig;
pub use error::ValidatorError;
pub use http::HttpTokenValidator;
pub use static_tokens::StaticTokenValidator;

use async_trait::async_trait;

/// Decides whether a bearer token is currently valid.
///
/// Implementations must not log the token.
#[async_trait]
pub trait TokenValidator: Send + Sync + 'static {
    /// `Ok(true)` if `token` is valid, `Ok(false)` if it is not, `Err` if
    /// no verdict could be reached.
    async fn validate(&self, token: &str) -> Result<bool, ValidatorError>;
}
