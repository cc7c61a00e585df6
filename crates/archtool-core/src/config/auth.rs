//! Caller identity configuration.

use serde::{Deserialize, Serialize};

/// Settings for decoding the bearer token issued by the authentication
/// service.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the token issuer.
    #[serde(default = "default_secret")]
    pub jwt_secret: String,
    /// Treat requests without an `Authorization` header as anonymous
    /// instead of rejecting them.
    #[serde(default)]
    pub allow_anonymous: bool,
    /// Allowed clock skew when validating `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"****")
            .field("allow_anonymous", &self.allow_anonymous)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_secret(),
            allow_anonymous: false,
            leeway_seconds: default_leeway(),
        }
    }
}

fn default_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_leeway() -> u64 {
    5
}
