//! Derived pagination over the submission collection
//!
//! Nothing here is stored: the page view is recomputed from the collection
//! length and the requested page every time it is needed.

use std::ops::Range;

/// Fixed number of rows per page
pub const PAGE_SIZE: usize = 10;

/// A page view derived from (collection length, page size, requested page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page, 1-based, always within `1..=total_pages`
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl Pagination {
    /// Compute the page view, clamping the requested page into range
    pub fn compute(total_items: usize, page_size: usize, requested_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        Self {
            page: requested_page.clamp(1, total_pages),
            total_pages,
            page_size,
            total_items,
        }
    }

    /// Offsets of the rows on the current page
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn contains(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    /// 1-based positions of the first and last row shown, for the page caption
    pub fn showing(&self) -> (usize, usize) {
        let range = self.range();
        if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        }
    }
}
