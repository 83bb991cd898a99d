//! Clerk session token verification settings

use serde::{Deserialize, Serialize};

use super::env_opt;

/// Identity provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// PEM encoded RS256 public key used to verify session tokens
    #[serde(default, skip_serializing)]
    pub jwt_public_key: Option<String>,

    /// Expected `iss` claim, checked only when set
    #[serde(default)]
    pub issuer: Option<String>,

    /// Allowed clock skew in seconds
    #[serde(default = "default_leeway")]
    pub leeway: u64,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self {
            // Keys pasted into .env files usually carry literal "\n"
            jwt_public_key: env_opt("CLERK_JWT_KEY").map(|key| key.replace("\\n", "\n")),
            issuer: env_opt("CLERK_ISSUER"),
            leeway: default_leeway(),
        }
    }

    pub fn with_public_key(mut self, pem: impl Into<String>) -> Self {
        self.jwt_public_key = Some(pem.into());
        self
    }

    pub fn is_configured(&self) -> bool {
        self.jwt_public_key.is_some()
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            jwt_public_key: None,
            issuer: None,
            leeway: default_leeway(),
        }
    }
}

fn default_leeway() -> u64 {
    5
}
