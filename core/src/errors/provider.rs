//! Failures reported by third-party providers.

use thiserror::Error;

/// Identity provider (session verification) failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identity provider error: {message}")]
pub struct IdentityError {
    /// HTTP-like status reported by the provider, if any
    pub status: Option<u16>,
    pub message: String,
}

impl IdentityError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(Some(401), message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(Some(403), message)
    }
}

/// Media host failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("media host error: {message}")]
pub struct MediaHostError {
    pub http_code: Option<u16>,
    pub message: String,
}

impl MediaHostError {
    pub fn new(http_code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            http_code,
            message: message.into(),
        }
    }

    /// Transport failure before any HTTP status was received
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }
}
