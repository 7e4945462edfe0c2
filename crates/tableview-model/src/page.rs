#![deny(unsafe_code)]

/// One page of a filtered collection.
///
/// `page_index` is 1-based and `total_pages` is never below 1, so an empty
/// table still reads "page 1 of 1".
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Page with no items.
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_index: 1,
            page_size,
            total_items: 0,
            total_pages: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based position of the first item on the page, 0 when empty.
    pub fn first_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page_index - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item on the page, 0 when empty.
    pub fn last_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page_index - 1) * self.page_size + self.items.len()
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }

    /// Same page bookkeeping over transformed items.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
