// Fixed-size client-side pagination. Pages are 1-based.

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    /// A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Pagination {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// ceil(item_count / page_size)
    pub fn total_pages(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.page_size)
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self, item_count: usize) -> bool {
        self.page < self.total_pages(item_count)
    }

    pub fn next(&mut self, item_count: usize) -> bool {
        if self.can_go_next(item_count) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.can_go_previous() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Pull the page back inside `1..=max(total_pages, 1)`.
    pub fn clamp(&mut self, item_count: usize) {
        let last = self.total_pages(item_count).max(1);
        self.page = self.page.clamp(1, last);
    }

    /// Index range of the current page within a sequence of `item_count` items.
    pub fn window(&self, item_count: usize) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(item_count);
        let end = (start + self.page_size).min(item_count);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.window(items.len())]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(DEFAULT_PAGE_SIZE)
    }
}
