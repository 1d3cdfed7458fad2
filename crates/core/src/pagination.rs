//! Page/limit pagination helpers shared by list endpoints.

use serde::Serialize;

/// Default page size for the public FAQ list and the editorial FAQ list.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Default page size for the editorial glossary list.
pub const DEFAULT_GLOSSARY_PAGE_SIZE: i64 = 50;

/// Hard upper bound on any page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Build a page request, clamping `page` to at least 1 and `limit` to
    /// `1..=MAX_PAGE_SIZE`. Missing values fall back to page 1 and `default_limit`.
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PAGE_SIZE)
    }
}

/// Pagination block returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageInfo {
    pub fn new(req: PageRequest, total: i64) -> Self {
        Self {
            page: req.page,
            limit: req.limit,
            total,
            total_pages: total_pages(total, req.limit),
        }
    }
}

/// Number of pages needed to show `total` items at `limit` per page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        let r = PageRequest::new(None, None, DEFAULT_PAGE_SIZE);
        assert_eq!(r, PageRequest { page: 1, limit: 20 });

        let r = PageRequest::new(Some(0), Some(1000), DEFAULT_PAGE_SIZE);
        assert_eq!(r, PageRequest { page: 1, limit: MAX_PAGE_SIZE });

        let r = PageRequest::new(Some(-3), Some(0), DEFAULT_PAGE_SIZE);
        assert_eq!(r, PageRequest { page: 1, limit: 1 });
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(Some(1), Some(20), 20).offset(), 0);
        assert_eq!(PageRequest::new(Some(3), Some(20), 20).offset(), 40);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
    }
}
