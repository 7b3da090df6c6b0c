use std::collections::HashMap;
use std::fmt::Write as _;

use async_trait::async_trait;
use http::HeaderMap;
use http::header::AUTHORIZATION;
use listsmith_config::IdentityConfig;
use listsmith_core::Caller;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

use crate::AuthError;

/// Turns a request credential into a verified caller
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` when the token is unknown
    async fn resolve(&self, token: &str) -> Result<Caller, AuthError>;
}

/// Identity provider backed by the configured user list
///
/// Tokens are kept only as SHA-256 digests.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenIdentity {
    callers: HashMap<String, Caller>,
}

impl StaticTokenIdentity {
    pub fn from_config(config: &IdentityConfig) -> Self {
        let callers: HashMap<String, Caller> = config
            .users
            .iter()
            .map(|user| {
                let caller = Caller {
                    id: user.id.clone(),
                    email: user.email.clone(),
                    subscription: user.subscription,
                };
                (sha256_hex(user.token.expose_secret()), caller)
            })
            .collect();

        tracing::info!(users = callers.len(), "loaded static identities");

        Self { callers }
    }

    /// Register a caller under `token`
    #[must_use]
    pub fn with_caller(mut self, token: &str, caller: Caller) -> Self {
        self.callers.insert(sha256_hex(token), caller);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.callers.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentity {
    async fn resolve(&self, token: &str) -> Result<Caller, AuthError> {
        self.callers
            .get(&sha256_hex(token))
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively. Returns `None` when the
/// header is missing, not UTF-8, uses another scheme, or is blank.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Compute the SHA-256 hex digest of a string
fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(64);
    for byte in digest {
        // Writing hex to a String is infallible
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
