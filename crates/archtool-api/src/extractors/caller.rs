//! `Caller` extractor: identifies the principal from the bearer token.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use archtool_core::error::AppError;
use archtool_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The calling principal, or an anonymous caller when allowed by config.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

impl std::ops::Deref for Caller {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
            if state.config.auth.allow_anonymous {
                return Ok(Caller(RequestContext::anonymous()));
            }
            return Err(AppError::authentication("Missing Authorization header").into());
        };

        let token = auth_header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;
        Ok(Caller(RequestContext::new(claims.user_id)))
    }
}
