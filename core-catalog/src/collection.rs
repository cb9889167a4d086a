//! Offset-addressed pages of catalog results

use serde::{Deserialize, Serialize};

/// One page of a larger, offset-addressed result set.
///
/// The page arithmetic is pure and performed over the stored fields only.
/// Inputs are not validated: `limit` must be non-zero, and every method that
/// divides by it panics when it is `0`.
///
/// # Examples
///
/// ```
/// use core_catalog::Collection;
///
/// let page = Collection::new(20, 10, 57, vec!["a"; 10]);
/// assert_eq!(page.total_pages(), 6);
/// assert_eq!(page.current_page(), 3);
/// assert!(page.has_next());
/// assert!(page.has_previous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// Index of the first item of this page within the full result set
    pub offset: u32,
    /// Page size
    pub limit: u32,
    /// Size of the full result set
    pub total: u32,
    /// Items of this page, at most `limit`
    pub items: Vec<T>,
}

impl<T> Collection<T> {
    pub fn new(offset: u32, limit: u32, total: u32, items: Vec<T>) -> Self {
        Self {
            offset,
            limit,
            total,
            items,
        }
    }

    /// `ceil(total / limit)`
    pub fn total_pages(&self) -> u32 {
        self.total.div_ceil(self.limit)
    }

    /// 1-indexed page number; offset 0 is page 1.
    pub fn current_page(&self) -> u32 {
        self.offset / self.limit + 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page() > 1
    }

    pub fn is_first(&self) -> bool {
        self.offset == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.offset) + self.items.len() as u64 == u64::from(self.total)
    }

    /// Offset of the previous page. Negative on the first page; callers clamp.
    pub fn previous_page_offset(&self) -> i64 {
        i64::from(self.offset) - i64::from(self.limit)
    }

    /// Offset of the next page. May exceed `total` on the last page.
    pub fn next_page_offset(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.limit)
    }

    pub fn first_page_offset(&self) -> u32 {
        0
    }

    /// `total - limit`, negative when the whole set fits in one page.
    pub fn last_page_offset(&self) -> i64 {
        i64::from(self.total) - i64::from(self.limit)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map the items to a different type, keeping the page metadata
    pub fn map<U, F>(self, f: F) -> Collection<U>
    where
        F: FnMut(T) -> U,
    {
        Collection {
            offset: self.offset,
            limit: self.limit,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }

    /// Snapshot of the derived navigation facts, for view models.
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page(),
            total_pages: self.total_pages(),
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            is_first: self.is_first(),
            is_last: self.is_last(),
            previous_offset: self.previous_page_offset(),
            next_offset: self.next_page_offset(),
            last_offset: self.last_page_offset(),
        }
    }
}

/// Derived navigation facts of a [`Collection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub is_first: bool,
    pub is_last: bool,
    pub previous_offset: i64,
    pub next_offset: u64,
    pub last_offset: i64,
}

/// Pagination request parameters
///
/// Pages are 1-indexed, as they appear in `?page=` query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Requested page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub limit: u32,
}

impl PageRequest {
    /// Create a new page request
    ///
    /// # Examples
    ///
    /// ```
    /// use core_catalog::PageRequest;
    ///
    /// let request = PageRequest::new(3, 10);
    /// assert_eq!(request.offset(), 20);
    /// ```
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Provider offset of the first item on this page
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}
