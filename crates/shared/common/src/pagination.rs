//! Page request and page response types.

use serde::{Deserialize, Serialize};

use domain::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Request for one page of a larger result set.
///
/// `page` is zero-based. `size` is clamped to `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    page: u64,
    #[serde(default = "default_size")]
    size: u64,
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    /// Create a page request for the zero-based `page` holding `size` elements
    pub fn of(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Zero-based page index
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Page size capped at maximum, never zero
    pub fn size(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of elements skipped before this page, `None` when it
    /// overflows `u64`
    pub fn offset(&self) -> Option<u64> {
        self.page.checked_mul(self.size())
    }

    /// Request for the following page
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the size of the whole result set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Create a page for `request` out of `total_elements` matches
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size();
        Self {
            content,
            page: request.page(),
            size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }

    /// Number of elements on this page
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    /// Check if a page follows this one
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    /// Check if no page follows this one
    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Convert the content, keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
