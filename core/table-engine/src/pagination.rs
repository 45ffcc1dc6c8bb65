//! FILENAME: core/table-engine/src/pagination.rs
//! Page windows over an ordered row sequence.
//!
//! Pages are a view of one specific ordering: for a fixed ordering every
//! row belongs to exactly one page. Anything that changes the ordering
//! sends the user back to the first page.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Rows per page when pagination is switched on without a size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    pub window: &'a [T],
    pub page_count: usize,
    pub page_index: usize,
}

/// Number of pages. A page size of 0 means unpaginated; an empty row set
/// still has one (empty) page.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        1
    } else {
        total.div_ceil(page_size).max(1)
    }
}

/// Clamps a requested page into `[0, page_count - 1]`.
pub fn clamp_page(page_index: usize, page_count: usize) -> usize {
    page_index.min(page_count.saturating_sub(1))
}

/// Index range of a page within `total` rows, after clamping.
pub fn page_bounds(total: usize, page_size: usize, page_index: usize) -> Range<usize> {
    if page_size == 0 {
        return 0..total;
    }
    let page_index = clamp_page(page_index, page_count(total, page_size));
    let start = (page_index * page_size).min(total);
    let end = (start + page_size).min(total);
    start..end
}

pub fn paginate<T>(rows: &[T], page_size: usize, page_index: usize) -> Page<'_, T> {
    let page_count = page_count(rows.len(), page_size);
    let page_index = clamp_page(page_index, page_count);
    Page {
        window: &rows[page_bounds(rows.len(), page_size, page_index)],
        page_count,
        page_index,
    }
}

// ============================================================================
// PAGE STATE
// ============================================================================

/// Current page of one table instance. `page_size` of `None` means the
/// table isn't paginated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub page_index: usize,
    pub page_size: Option<usize>,
}

impl PageState {
    pub fn new(page_size: Option<usize>) -> Self {
        PageState {
            page_index: 0,
            page_size: page_size.filter(|&size| size > 0),
        }
    }

    fn effective_size(&self) -> usize {
        self.page_size.unwrap_or(0)
    }

    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.effective_size())
    }

    /// Moves to `page_index`, clamped. Returns the page actually selected.
    pub fn go_to(&mut self, page_index: usize, total: usize) -> usize {
        self.page_index = clamp_page(page_index, self.page_count(total));
        self.page_index
    }

    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    /// Changes rows per page and returns to the first page. A size of 0
    /// is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size > 0 {
            self.page_size = Some(page_size);
            self.page_index = 0;
        }
    }

    pub fn bounds(&self, total: usize) -> Range<usize> {
        page_bounds(total, self.effective_size(), self.page_index)
    }
}
