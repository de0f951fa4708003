//! Search request payload for listing endpoints

use serde::{Deserialize, Serialize};

use super::catalog::FilterCatalog;
use super::filter::{FilterRow, TypedBackendFilter, sanitize_filters};
use super::order::{SortOption, SortRow, sanitize_sorts};
use crate::config::DEFAULT_PAGE_SIZE;

/// Page position of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number. Page 0 is read as page 1.
    pub page: usize,
    pub limit: usize,
}

impl Pagination {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    pub fn offset(&self) -> usize {
        self.page.max(1).saturating_sub(1).saturating_mul(self.limit)
    }

    /// The first page with the same limit
    pub fn first_page(&self) -> Self {
        Self::new(1, self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Body of `POST /<resource>/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub filters: Vec<TypedBackendFilter>,
    pub sort: Vec<SortOption>,
    pub limit: usize,
    pub offset: usize,
}

impl SearchRequest {
    /// Sanitize filter and sort rows into a request for one page.
    pub fn encode(
        rows: &[FilterRow],
        sorts: &[SortRow],
        catalog: &FilterCatalog,
        pagination: Pagination,
    ) -> Self {
        Self {
            filters: sanitize_filters(rows, catalog),
            sort: sanitize_sorts(sorts),
            limit: pagination.limit,
            offset: pagination.offset(),
        }
    }
}
