//! Page-number pagination shared by every filtered query

use crate::{EdudirError, Result};
use serde::{Deserialize, Serialize};

/// Page used when the caller does not send one
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when the caller does not send one
pub const DEFAULT_LIMIT: usize = 10;

/// Largest accepted page size
pub const MAX_LIMIT: usize = 100;

/// A validated `(page, limit)` pair
///
/// `page` is 1-based and `limit` lies in `1..=MAX_LIMIT`, so the slice it
/// selects is always well defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    /// Create a page request
    ///
    /// # Errors
    ///
    /// Returns `EdudirError::Validation` when `page` is 0 or `limit` is
    /// outside `1..=MAX_LIMIT`.
    ///
    /// # Examples
    ///
    /// ```
    /// use edudir_core::pagination::PageRequest;
    ///
    /// let request = PageRequest::new(3, 10).unwrap();
    /// assert_eq!(request.offset(), 20);
    /// assert!(PageRequest::new(0, 10).is_err());
    /// assert!(PageRequest::new(1, 0).is_err());
    /// ```
    pub fn new(page: usize, limit: usize) -> Result<Self> {
        if page == 0 {
            return Err(EdudirError::validation("page must be at least 1"));
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(EdudirError::validation(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        Ok(Self { page, limit })
    }

    /// 1-based page number
    pub fn page(&self) -> usize {
        self.page
    }

    /// Page size
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Index of the first item on this page, saturating for absurd pages
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the totals clients need to walk the rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Echoed page number
    pub page: usize,
    /// Echoed page size
    pub limit: usize,
    /// Matching items before pagination
    pub total: usize,
    /// `ceil(total / limit)`
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Assemble the envelope for an already sliced page
    pub fn new(data: Vec<T>, request: PageRequest, total: usize) -> Self {
        Self {
            data,
            page: request.page(),
            limit: request.limit(),
            total,
            total_pages: total_pages(total, request.limit()),
        }
    }
}

/// Number of pages needed for `total` items; `limit` must be non-zero
pub fn total_pages(total: usize, limit: usize) -> usize {
    total.div_ceil(limit)
}
