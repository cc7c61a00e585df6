//! Pagination query parameters.

use serde::{Deserialize, Serialize};

use archtool_core::types::PageRequest;

use super::query::lenient;

/// Query parameters for paginated endpoints.
///
/// Values are kept as text so that an unparseable `limit` or `offset`
/// falls back to the defaults instead of failing the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitOffsetParams {
    /// Page size (default 50, max 200).
    pub limit: Option<String>,
    /// Items to skip.
    pub offset: Option<String>,
}

impl LimitOffsetParams {
    /// Converts to a clamped `PageRequest`.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            lenient(self.limit.as_deref()),
            lenient(self.offset.as_deref()),
        )
    }
}
