use std::ops::Range;

/// `[start, end)` of `page` when `total` items are split `per_page` at a time.
/// `page` is clamped to the last page; an empty set has one empty page.
pub fn slice_bounds(total: usize, per_page: usize, page: usize) -> (usize, usize) {
    let per_page = per_page.max(1);
    let page = page.min(total_pages(total, per_page) - 1);
    let start = page * per_page;
    let end = (start + per_page).min(total);
    (start.min(total), end)
}

fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Page cursor over an in-memory result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    per_page: usize,
    total: usize,
}

impl Pager {
    pub fn new(total: usize, per_page: usize) -> Self {
        Self {
            page: 0,
            per_page: per_page.max(1),
            total,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.per_page)
    }

    pub fn next(&mut self) {
        if self.page + 1 < self.total_pages() {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn range(&self) -> Range<usize> {
        let (start, end) = slice_bounds(self.total, self.per_page, self.page);
        start..end
    }

    /// The items of `items` on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = slice_bounds(items.len(), self.per_page, self.page);
        &items[start..end]
    }
}
