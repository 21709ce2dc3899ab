//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token verification settings.
///
/// Tokens are issued by the account service; this process only verifies
/// them, so the secret must match the issuer's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 JWT verification.
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token TTL in minutes (used when minting tokens for tooling and tests).
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Allowed clock skew in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_access_ttl_minutes: default_access_ttl(),
            leeway_seconds: default_leeway(),
        }
    }
}

fn default_access_ttl() -> u64 {
    60
}

fn default_leeway() -> u64 {
    5
}
