//! # Client-side Pagination
//!
//! The remote collection has no paging protocol; the whole (filtered) list is
//! fetched and revealed a page at a time with a "load more" action.
//!
//! ```text
//! items:    [0 1 2 3 4 5 6 7 | 8 9 10 11 12 13 14 15 | 16 17]
//! visible:   └── page 1 ───┘   └──── load_more() ───┘
//! has_more:  true after page 1, true after page 2, false after page 3
//! ```

use crate::ITEMS_PER_PAGE;

/// Tracks how many items are currently revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    visible_count: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator::new(ITEMS_PER_PAGE)
    }
}

impl Paginator {
    /// Creates a paginator showing one page. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Paginator {
            page_size,
            visible_count: page_size,
        }
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// The revealed prefix of `items`.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_count.min(items.len())]
    }

    /// Whether a "load more" action would reveal anything.
    pub fn has_more(&self, total: usize) -> bool {
        self.visible_count < total
    }

    /// Reveals one more page.
    pub fn load_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(self.page_size);
    }

    /// Reveals exactly `pages` pages (at least one).
    pub fn show_pages(&mut self, pages: usize) {
        self.visible_count = self.page_size.saturating_mul(pages.max(1));
    }

    /// Back to the first page, e.g. after a new search.
    pub fn reset(&mut self) {
        self.visible_count = self.page_size;
    }
}
