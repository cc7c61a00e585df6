//! `If-Match` header carrying the revision an edit is based on.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

/// The expected revision from `If-Match`, if the header names one.
///
/// `*`, a missing header, and values that are not a revision all mean
/// "no optimistic check".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IfMatch(pub Option<i32>);

impl<S> FromRequestParts<S> for IfMatch
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let revision = parts
            .headers
            .get(header::IF_MATCH)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_if_match);
        Ok(IfMatch(revision))
    }
}

/// Parse an entity tag of the form `5`, `"5"` or `W/"5"`.
pub fn parse_if_match(value: &str) -> Option<i32> {
    let value = value.trim();
    let value = value.strip_prefix("W/").unwrap_or(value);
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    value.trim().parse().ok()
}
