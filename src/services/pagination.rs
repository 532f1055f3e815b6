use serde::{Deserialize, Serialize};

/// Normalized page request. Page numbers are 1-based; both values are
/// clamped to at least 1.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: u64,
    pub limit: u64,
}

impl PageParams {
    pub fn new(page: Option<u64>, limit: Option<u64>, default_limit: u64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).max(1),
        }
    }

    /// Zero-based page index for the store query.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

/// Pagination metadata returned alongside every list result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(params: PageParams, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(params.limit);
        Self {
            page: params.page,
            limit: params.limit,
            total_count,
            total_pages,
            has_next: params.page < total_pages,
            has_prev: params.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_division() {
        let p = Pagination::new(PageParams::new(Some(2), Some(10), 50), 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(p.has_prev);

        let p = Pagination::new(PageParams::new(Some(3), Some(10), 50), 30);
        assert_eq!(p.total_pages, 3);
        assert!(!p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn empty_result_set_has_no_pages() {
        let p = Pagination::new(PageParams::new(None, None, 50), 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn page_and_limit_are_clamped_to_one() {
        let params = PageParams::new(Some(0), Some(0), 50);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 1);
        assert_eq!(params.index(), 0);
    }
}
