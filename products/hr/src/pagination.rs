//! Page arithmetic and the page-button window.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 9;
pub const DEFAULT_WINDOW_WIDTH: usize = 5;

/// Page position over a collection of known length.
///
/// `total_pages` is `ceil(count / page_size)` and is zero for an empty
/// collection; `current_page` never drops below 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current_page: usize,
    total_pages: usize,
}

/// One control of the rendered pagination bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageControl {
    Previous { target: usize, disabled: bool },
    Page { number: usize, active: bool },
    Ellipsis,
    Next { target: usize, disabled: bool },
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_pages: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Recomputes the page count for `count` records and pulls the current
    /// page back inside `[1, max(1, total_pages)]`.
    pub fn resize(&mut self, count: usize) {
        self.total_pages = count.div_ceil(self.page_size);
        self.current_page = self.current_page.clamp(1, self.total_pages.max(1));
    }

    /// Moves to `page` when it lies within `[1, total_pages]`. Anything else is
    /// dropped and reported as `false`.
    pub fn set_page(&mut self, page: usize) -> bool {
        if (1..=self.total_pages).contains(&page) {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    /// Index range of the current page within a collection of `len` records.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    /// First and last page numbers of a window `width` pages wide around the
    /// current page. The window shifts left when it runs into the last page.
    pub fn window(&self, width: usize) -> (usize, usize) {
        let width = width.max(1);
        let mut start = self.current_page.saturating_sub(width / 2).max(1);
        let end = self.total_pages.min(start.saturating_add(width - 1));
        if end + 1 < start.saturating_add(width) {
            start = (end + 1).saturating_sub(width).max(1);
        }
        (start, end)
    }

    pub fn controls(&self, width: usize) -> Vec<PageControl> {
        let (start, end) = self.window(width);
        let mut controls = vec![PageControl::Previous {
            target: self.current_page.saturating_sub(1),
            disabled: self.current_page == 1,
        }];

        if start > 1 {
            controls.push(PageControl::Page {
                number: 1,
                active: false,
            });
            if start > 2 {
                controls.push(PageControl::Ellipsis);
            }
        }

        controls.extend((start..=end).map(|number| PageControl::Page {
            number,
            active: number == self.current_page,
        }));

        if end < self.total_pages {
            if end + 1 < self.total_pages {
                controls.push(PageControl::Ellipsis);
            }
            controls.push(PageControl::Page {
                number: self.total_pages,
                active: false,
            });
        }

        controls.push(PageControl::Next {
            target: self.current_page + 1,
            disabled: self.current_page >= self.total_pages,
        });
        controls
    }
}
