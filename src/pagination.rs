use serde::Serialize;

use crate::domain::types::{PageNumber, PageSize};

/// Page links around `current_page`: `Some(n)` is a link, `None` an ellipsis.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of rows plus what the pagination controls need.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: u32,
    pub page_size: u32,
    /// Total reported by the source, not the number of `items`.
    pub total: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    /// `fetched` is how many records the source delivered for this page.
    ///
    /// A `total` no larger than one page carries no information about later
    /// pages (the random-user service reports the page's own count), so the
    /// listing is then open-ended: a full page implies a next one.
    pub fn new(
        items: Vec<T>,
        page: PageNumber,
        page_size: PageSize,
        total: usize,
        fetched: usize,
    ) -> Self {
        let size = page_size.as_usize();
        let current = page.get() as usize;

        let (total_pages, has_next) = if total > size {
            let total_pages = total.div_ceil(size);
            (total_pages.max(current), current < total_pages)
        } else {
            let has_next = fetched >= size;
            (current + usize::from(has_next), has_next)
        };

        Self {
            items,
            pages: get_pages(total_pages, current, 2, 2, 4, 2),
            page: page.get(),
            page_size: page_size.get(),
            total,
            has_previous: current > 1,
            has_next,
        }
    }
}
