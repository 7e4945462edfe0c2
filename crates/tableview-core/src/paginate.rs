//! Slicing a filtered collection into fixed-size pages.

use std::num::NonZeroUsize;

use tableview_model::Page;

/// Number of pages needed for `total_items`, never less than one.
pub fn total_pages(total_items: usize, page_size: NonZeroUsize) -> usize {
    total_items.div_ceil(page_size.get()).max(1)
}

/// Clamp a requested 1-based page into the valid range.
pub fn clamp_page(requested_page: usize, total_items: usize, page_size: NonZeroUsize) -> usize {
    requested_page.clamp(1, total_pages(total_items, page_size))
}

/// The requested page of `filtered`.
///
/// Out-of-range requests are clamped: 0 reads page 1, anything past the end
/// reads the last page.
pub fn paginate<T>(filtered: &[T], page_size: NonZeroUsize, requested_page: usize) -> Page<&T> {
    let size = page_size.get();
    let total_items = filtered.len();
    let page_index = clamp_page(requested_page, total_items, page_size);
    let start = (page_index - 1) * size;
    let end = (start + size).min(total_items);
    Page {
        items: filtered[start.min(total_items)..end].iter().collect(),
        page_index,
        page_size: size,
        total_items,
        total_pages: total_pages(total_items, page_size),
    }
}
