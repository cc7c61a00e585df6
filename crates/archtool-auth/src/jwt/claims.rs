//! JWT claims issued by the authentication service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use archtool_core::types::PrincipalId;

/// Claims payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user.
    pub user_id: PrincipalId,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Claims for `user_id` expiring at `expires_at`.
    pub fn new(user_id: PrincipalId, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            exp: expires_at.timestamp(),
        }
    }
}
