// ABOUTME: Pagination utilities for list endpoints
// ABOUTME: Provides standardized query parameters and response metadata

use serde::{Deserialize, Serialize};

/// Default page size for paginated queries
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size to prevent performance issues
pub const MAX_PAGE_SIZE: i64 = 200;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: i64 = 1;

/// Query parameters for pagination
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed, defaults to 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Number of items per page (defaults to DEFAULT_PAGE_SIZE, max MAX_PAGE_SIZE)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    MIN_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Create pagination params with custom values
    pub fn with_page_and_limit(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Validate and normalize pagination parameters
    /// Returns (limit, offset) suitable for SQL queries
    pub fn validate(&self) -> (i64, i64) {
        // Ensure page is at least 1
        let page = self.page.max(MIN_PAGE);

        // Clamp limit between 1 and MAX_PAGE_SIZE
        let limit = self.limit.clamp(1, MAX_PAGE_SIZE);

        // Calculate offset (0-indexed for SQL)
        let offset = (page - 1) * limit;

        (limit, offset)
    }

    /// Get SQL LIMIT clause value
    pub fn limit(&self) -> i64 {
        self.validate().0
    }

    /// Get SQL OFFSET clause value
    pub fn offset(&self) -> i64 {
        self.validate().1
    }

    /// Get the current page number
    pub fn page(&self) -> i64 {
        self.page.max(MIN_PAGE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: MIN_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination block returned alongside listing data
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    /// Current page number (1-indexed)
    pub page: i64,

    /// Items per page
    pub limit: i64,

    /// Total number of items across all pages
    pub total: i64,

    /// Total number of pages
    pub pages: i64,
}

impl PageInfo {
    /// Create pagination metadata from params and total count
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let page = params.page();
        let limit = params.limit();
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}
