//! Page partitioning for paginated grid rendering.
//!
//! A presentation surface showing a menu as a paged grid splits the item
//! sequence into fixed-size pages of `rows x cols` items, in index order.
//! Pagination is purely a view concern: the math here never touches, let
//! alone reorders, the model.

use std::ops::Range;

/// The fixed grid shape of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageLayout {
    /// Rows per page.
    pub rows: usize,
    /// Columns per page.
    pub cols: usize,
}

impl PageLayout {
    /// Creates a layout of `rows x cols` items per page.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// The number of items one page holds.
    #[must_use]
    pub const fn per_page(self) -> usize {
        self.rows * self.cols
    }

    /// The number of pages needed for `len` items.
    ///
    /// A degenerate layout with zero capacity has zero pages.
    #[must_use]
    pub const fn count(self, len: usize) -> usize {
        let per_page = self.per_page();

        if per_page == 0 { 0 } else { len.div_ceil(per_page) }
    }

    /// The index range of `page` within a sequence of `len` items.
    ///
    /// The tail page is clamped to the sequence; out-of-range pages yield an
    /// empty range at `len`.
    #[must_use]
    pub fn range(self, page: usize, len: usize) -> Range<usize> {
        let per_page = self.per_page();
        let start = len.min(page.saturating_mul(per_page));
        let end = len.min(start.saturating_add(per_page));

        start..end
    }
}
