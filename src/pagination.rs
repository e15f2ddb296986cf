use serde::Serialize;

use crate::client::PageResult;
use crate::domain::truck::Truck;

/// Page size used when the configuration does not provide one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

/// Number of pages needed to show `total_items` in pages of `page_size`.
pub fn total_pages_for(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Ordered, one-based page indices `1..=total_pages` for the pager.
pub fn page_indices(total_pages: usize) -> Vec<usize> {
    (1..=total_pages).collect()
}

/// Immutable snapshot of the truck list as last reported by the backend.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub items: Vec<Truck>,
    pub pages: Vec<usize>,
}

impl PageState {
    /// State before any backend response: page 1, nothing loaded.
    pub fn empty(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_items: 0,
            total_pages: 0,
            items: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// State built from a completed fetch of `page`.
    pub fn from_result(page: usize, page_size: usize, result: PageResult) -> Self {
        Self {
            current_page: page,
            page_size,
            total_items: result.total_items,
            total_pages: result.total_pages,
            items: result.items,
            pages: page_indices(result.total_pages),
        }
    }

    /// Whether `page` can be navigated to from this state.
    pub fn accepts(&self, page: usize) -> bool {
        self.total_pages > 0 && page >= 1 && page <= self.total_pages
    }

    pub fn previous_page(&self) -> Option<usize> {
        let previous = self.current_page.checked_sub(1)?;
        self.accepts(previous).then_some(previous)
    }

    pub fn next_page(&self) -> Option<usize> {
        let next = self.current_page + 1;
        self.accepts(next).then_some(next)
    }
}
