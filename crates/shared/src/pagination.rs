//! Page-based pagination utilities.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on the page size accepted from clients.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Error type for paginator construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Page size must be at least 1")]
    ZeroPageSize,
    #[error("Page size must be at most {0}")]
    PageSizeTooLarge(u32),
}

/// Number of pages needed to show `count` items.
///
/// Always at least 1, so an empty result still has a (blank) first page.
pub fn total_pages(count: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    let pages = count.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamps a requested page into `1..=total_pages`.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Pagination metadata returned alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One page of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maps the items of the page, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Slices `items` into the requested page.
///
/// A page of 0 is read as page 1 and a page past the end is clamped to the
/// last page, so a stale page number never yields a blank table while
/// matching records exist.
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total_pages(total, per_page);
    let page = clamp_page(page, total_pages);
    let offset = (page as usize - 1) * per_page as usize;

    let data = items
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .collect();

    Page {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }
}

/// Stateful page cursor for a list view.
///
/// Holds the current page and page size. Callers that change the composition
/// of the underlying list are expected to call [`Paginator::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: u32,
    per_page: u32,
}

impl Paginator {
    pub fn new(per_page: u32) -> Result<Self, PaginationError> {
        if per_page == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        if per_page > MAX_PAGE_SIZE {
            return Err(PaginationError::PageSizeTooLarge(MAX_PAGE_SIZE));
        }
        Ok(Self { page: 1, per_page })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Moves to `page`; values below 1 are read as 1.
    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn next(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Returns to the first page.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Slices `items` at the current page and pulls the cursor back inside
    /// the valid range if the list shrank.
    pub fn paginate<T>(&mut self, items: Vec<T>) -> Page<T> {
        let page = paginate(items, self.page, self.per_page);
        self.page = page.pagination.page;
        page
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}
