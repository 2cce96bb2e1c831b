//! Pagination window value object.

use serde::{Deserialize, Serialize};

/// Limit substituted when the caller asks for zero or fewer rows.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Upper bound on rows returned by a single list call.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// `{limit, offset}` pair bounding a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Clamp the window to what the store is allowed to serve.
    ///
    /// `limit <= 0` becomes [`DEFAULT_PAGE_LIMIT`], anything above
    /// [`MAX_PAGE_LIMIT`] is capped, and a negative offset starts at zero.
    pub fn normalized(self) -> Self {
        let limit = if self.limit <= 0 {
            DEFAULT_PAGE_LIMIT
        } else {
            self.limit.min(MAX_PAGE_LIMIT)
        };

        Self {
            limit,
            offset: self.offset.max(0),
        }
    }
}
