//! Catalog paging.

use serde::{Deserialize, Serialize};

/// Page requested by a `?page=&per_page=` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
}

impl PageRequest {
    /// Items per page when the client does not ask.
    pub const DEFAULT_PER_PAGE: u64 = 25;
    /// Largest page a client may request.
    pub const MAX_PER_PAGE: u64 = 100;

    /// Build a request, clamping page to at least 1 and per_page into
    /// `1..=MAX_PER_PAGE`.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// SQL `OFFSET`.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// SQL `LIMIT`.
    pub fn limit(&self) -> u64 {
        self.per_page
    }

    /// Cut this page out of an already ordered list.
    pub fn paginate<T: Serialize>(&self, all: Vec<T>) -> PageResponse<T> {
        let total = all.len() as u64;
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(skip).take(take).collect();
        PageResponse::new(items, *self, total)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PER_PAGE)
    }
}

/// One page of results plus the counts a storefront pager needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Page number (1-based).
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Items across all pages.
    pub total_items: u64,
    /// Page count; an empty result still has one page.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
}

impl<T: Serialize> PageResponse<T> {
    /// Wrap `items` fetched for `request` out of `total_items`.
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(request.per_page.max(1)).max(1);
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total_items,
            total_pages,
            has_next: request.page < total_pages,
        }
    }
}
