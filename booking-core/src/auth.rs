//! Shared-secret credential gate
//!
//! A request may present the secret in any one of three places: an
//! `Authorization: Bearer` header, an `x-api-key` header or an `api_key`
//! query parameter. All three are equally valid and compared byte-for-byte.

use crate::error::{BookingError, Result};
use tracing::debug;

/// Prefix an `Authorization` header must carry before the secret
pub const BEARER_PREFIX: &str = "Bearer ";

/// Credential candidates extracted from a single request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Raw `Authorization` header value
    pub authorization: Option<&'a str>,
    /// Raw `x-api-key` header value
    pub api_key_header: Option<&'a str>,
    /// `api_key` query parameter
    pub api_key_query: Option<&'a str>,
}

impl<'a> Credentials<'a> {
    /// Create an empty set of credentials
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `Authorization` header value
    pub fn authorization(mut self, value: &'a str) -> Self {
        self.authorization = Some(value);
        self
    }

    /// Set the `x-api-key` header value
    pub fn api_key_header(mut self, value: &'a str) -> Self {
        self.api_key_header = Some(value);
        self
    }

    /// Set the `api_key` query parameter
    pub fn api_key_query(mut self, value: &'a str) -> Self {
        self.api_key_query = Some(value);
        self
    }

    /// Token following the `Bearer ` prefix, if the header has that shape
    pub fn bearer_token(&self) -> Option<&'a str> {
        self.authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
    }
}

/// Gate deciding whether a request may reach a protected endpoint
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    secret: Option<String>,
}

impl AuthGate {
    /// Create a gate for the given secret.
    ///
    /// An absent or empty secret puts the gate in open mode, where every
    /// request is allowed.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Create a gate that allows every request
    pub fn open() -> Self {
        Self { secret: None }
    }

    /// Whether the gate enforces nothing
    pub fn is_open(&self) -> bool {
        self.secret.is_none()
    }

    /// Check the presented credentials against the configured secret
    pub fn check(&self, credentials: &Credentials<'_>) -> Result<()> {
        let Some(secret) = self.secret.as_deref() else {
            return Ok(());
        };

        let via_bearer = credentials.bearer_token() == Some(secret);
        let via_header = credentials.api_key_header == Some(secret);
        let via_query = credentials.api_key_query == Some(secret);

        if via_bearer || via_header || via_query {
            debug!(via_bearer, via_header, via_query, "Credential accepted");
            Ok(())
        } else {
            Err(BookingError::Unauthorized)
        }
    }
}
