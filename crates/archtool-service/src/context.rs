//! Request context carrying the calling principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use archtool_core::types::PrincipalId;

/// Context for the current request.
///
/// Built by the API layer from the bearer token and passed into service
/// methods so that every mutation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated principal, or `None` for an anonymous caller.
    pub principal: Option<PrincipalId>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context for an authenticated principal.
    pub fn new(principal: PrincipalId) -> Self {
        Self {
            principal: Some(principal),
            request_time: Utc::now(),
        }
    }

    /// Context for a caller without a token.
    pub fn anonymous() -> Self {
        Self {
            principal: None,
            request_time: Utc::now(),
        }
    }
}
