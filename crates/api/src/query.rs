//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Largest page a caller may request with an explicit `limit`.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Optional `?limit=&offset=` paging for list endpoints.
///
/// Lists are unbounded unless the caller asks for a page.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// `(limit, offset)` ready to bind. An explicit limit is clamped to
    /// `[1, MAX_PAGE_SIZE]`; an absent one stays `None` (SQL `LIMIT NULL`).
    pub fn window(&self) -> (Option<i64>, i64) {
        let limit = self.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE));
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}
