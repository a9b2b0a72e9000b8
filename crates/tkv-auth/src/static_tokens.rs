//! # Static Token Validator
//!
//! Accepts any token from a fixed set. Every candidate is compared in
//! constant time and the scan never exits early, so timing reveals neither
//! which token matched nor how long the accepted tokens are.
//!
//! An empty set rejects everything.

use async_trait::async_trait;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::ValidatorError;
use crate::TokenValidator;

/// [`TokenValidator`] over a fixed set of accepted tokens.
///
/// Custom `Debug` reports only how many tokens are held.
#[derive(Clone, Default)]
pub struct StaticTokenValidator {
    tokens: Vec<Zeroizing<String>>,
}

impl std::fmt::Debug for StaticTokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenValidator")
            .field("tokens", &format_args!("[REDACTED; {}]", self.tokens.len()))
            .finish()
    }
}

impl StaticTokenValidator {
    /// Accept exactly `tokens`. Blank entries are dropped.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty())
            .map(Zeroizing::new)
            .collect();
        Self { tokens }
    }

    /// Parse a comma-separated list, trimming whitespace around each entry.
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(',').map(str::trim))
    }

    /// Number of accepted tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether every token is rejected.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn accepts(&self, provided: &str) -> bool {
        let mut matched = false;
        for expected in &self.tokens {
            matched |= constant_time_token_eq(provided, expected.as_str());
        }
        matched
    }
}

/// Constant-time comparison of two tokens.
///
/// When lengths differ, performs a dummy comparison to avoid leaking length
/// information through timing variance.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

#[async_trait]
impl TokenValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Result<bool, ValidatorError> {
        Ok(self.accepts(token))
    }
}
