//! Pagination types for list endpoints.

use serde::Serialize;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const MAX_OFFSET: u64 = i64::MAX as u64;

/// Page selection (1-indexed), already clamped to valid bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub page_size: u64,
}

impl PaginationParams {
    /// Pages past the largest offset a SQL `OFFSET` can bind are clamped.
    pub fn new(page: u64, page_size: u64) -> Self {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let last_page = MAX_OFFSET / page_size + 1;
        Self {
            page: page.clamp(1, last_page),
            page_size,
        }
    }

    /// Build from raw query values; anything unparseable falls back to the default.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PAGE_NUMBER);
        let page_size = page_size
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self::new(page, page_size)
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(MAX_OFFSET)
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.page_size.min(MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response body: `{items, pagination}`
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, params: PaginationParams, total_count: u64) -> Self {
        let page_size = params.limit();
        let total_pages = if page_size > 0 {
            total_count.div_ceil(page_size)
        } else {
            0
        };

        Self {
            items,
            pagination: PaginationMeta {
                page: params.page,
                page_size,
                total_count,
                total_pages,
            },
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
