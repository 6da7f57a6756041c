//! Pagination parameters and results.
//!
//! Out-of-range inputs are clamped rather than rejected: a page below 1
//! becomes 1 and a page size is held within `1..=max_page_size`. Requesting
//! a page past the end is valid and yields no items.

use serde::Serialize;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound on the number of items per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size limits configured for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePolicy {
    default_page_size: u32,
    max_page_size: u32,
}

impl PagePolicy {
    /// Creates a policy. `max_page_size` is at least 1 and the default is
    /// held within `1..=max_page_size`.
    pub fn new(default_page_size: u32, max_page_size: u32) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

/// A normalized request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a request, raising zero values to 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Normalize raw caller input against a policy.
    ///
    /// Absent values take their defaults (page 1, the policy's default page
    /// size); present values are clamped into range.
    pub fn clamped(page: Option<i64>, page_size: Option<i64>, policy: &PagePolicy) -> Self {
        let page = page.map_or(1, |p| clamp_to_u32(p, 1, u32::MAX));
        let page_size = page_size.map_or(policy.default_page_size, |s| {
            clamp_to_u32(s, 1, policy.max_page_size)
        });
        Self { page, page_size }
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

fn clamp_to_u32(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(i64::from(min), i64::from(max)) as u32
}

/// One page of results plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page, in ascending id order.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: usize,
    /// 1-based page number that was requested.
    pub page: u32,
    /// Page size that was applied.
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Number of pages needed to hold `total` items. At least 1.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(self.page_size.max(1) as usize);
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// The page before this one, if any.
    pub fn previous_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// The page after this one, if it holds items.
    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.total_pages()).then(|| self.page + 1)
    }
}
