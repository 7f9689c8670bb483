//! Offset pagination primitives for list endpoints.
//!
//! List endpoints accept a requested page and limit, count the matching
//! records, and then fetch one window of results. [`PageMeta::compute`] turns
//! the caller's request, the total count, and the deployment's default limit
//! into the effective window (`offset`, `limit`) plus the metadata echoed back
//! to clients.
//!
//! The default limit is carried as a string because it arrives from
//! configuration untouched. It is parsed on every call so a misconfigured
//! deployment fails loudly instead of serving unbounded or empty pages.
//!
//! # Examples
//! ```
//! use pagination::{PageMeta, PageRequest};
//!
//! let meta = PageMeta::compute(PageRequest::new(2, 0), 25, "10")?;
//! assert_eq!(meta.page(), 2);
//! assert_eq!(meta.limit(), 10);
//! assert_eq!(meta.offset(), 10);
//! assert_eq!(meta.page_count(), 3);
//! # Ok::<(), pagination::PaginationError>(())
//! ```

use serde::{Deserialize, Serialize};

/// Errors raised while computing pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The configured default limit is not a positive integer.
    #[error("invalid default page limit {value:?}: expected a positive integer")]
    InvalidDefaultLimit {
        /// Raw configuration value that failed to parse.
        value: String,
    },
    /// The requested window starts beyond the representable offset range.
    #[error("page {page} with limit {limit} overflows the result offset")]
    OffsetOverflow {
        /// Effective page number.
        page: u64,
        /// Effective page size.
        limit: u64,
    },
}

/// Page window requested by a caller.
///
/// Values are taken verbatim from the request; zero or negative numbers mean
/// "not provided" and are normalised by [`PageMeta::compute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Build a request from raw page and limit values.
    #[must_use]
    pub const fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Requested page number as supplied.
    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    /// Requested page size as supplied.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }
}

/// Effective pagination window and totals returned alongside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    page: u64,
    limit: u64,
    total: u64,
    offset: u64,
}

impl PageMeta {
    /// Compute the effective window for `request` over `total` records.
    ///
    /// - A page of zero or less becomes page 1.
    /// - A limit of zero or less falls back to `default_limit`.
    /// - `offset = (page - 1) * limit`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidDefaultLimit`] when `default_limit`
    /// does not parse to a positive integer, whatever the request holds, and
    /// [`PaginationError::OffsetOverflow`] when the offset cannot be
    /// represented.
    pub fn compute(
        request: PageRequest,
        total: u64,
        default_limit: &str,
    ) -> Result<Self, PaginationError> {
        let fallback_limit = parse_default_limit(default_limit)?;
        let limit = positive(request.limit).unwrap_or(fallback_limit);
        let page = positive(request.page).unwrap_or(1);
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or(PaginationError::OffsetOverflow { page, limit })?;

        Ok(Self {
            page,
            limit,
            total,
            offset,
        })
    }

    /// Effective page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Effective page size.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Total number of records matching the query.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of records skipped before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of pages needed to show every record at the effective limit.
    #[must_use]
    pub const fn page_count(&self) -> u64 {
        self.total.div_ceil(self.limit)
    }
}

fn parse_default_limit(raw: &str) -> Result<u64, PaginationError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|limit| *limit > 0)
        .ok_or_else(|| PaginationError::InvalidDefaultLimit {
            value: raw.to_owned(),
        })
}

fn positive(value: i64) -> Option<u64> {
    u64::try_from(value).ok().filter(|v| *v > 0)
}
