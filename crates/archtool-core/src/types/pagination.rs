//! Limit/offset pagination for list operations.

use serde::{Deserialize, Serialize};

/// Page size used when the caller gives none or an out-of-range value.
pub const DEFAULT_LIMIT: i64 = 50;
/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 200;

/// A clamped limit/offset window.
///
/// `limit` is always in `1..=MAX_LIMIT` and `offset` is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    limit: i64,
    offset: i64,
}

impl PageRequest {
    /// Build a window from raw caller input.
    ///
    /// A missing limit, or one outside `(0, MAX_LIMIT]`, falls back to
    /// [`DEFAULT_LIMIT`]. A missing or negative offset becomes `0`.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            Some(l) if l > 0 && l <= MAX_LIMIT => l,
            _ => DEFAULT_LIMIT,
        };
        Self {
            limit,
            offset: offset.unwrap_or(0).max(0),
        }
    }

    /// The SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// The SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Apply the window to an already ordered iterator.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the total number of matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Count of all matches, ignoring pagination.
    pub total: i64,
    /// The effective limit used.
    pub limit: i64,
    /// The effective offset used.
    pub offset: i64,
}

impl<T> PageResponse<T> {
    /// Create a new page.
    pub fn new(items: Vec<T>, total: i64, page: &PageRequest) -> Self {
        Self {
            items,
            total,
            limit: page.limit(),
            offset: page.offset(),
        }
    }
}
