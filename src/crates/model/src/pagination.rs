use serde::{Deserialize, Serialize};

pub const MAX_PAGE_SIZE: u64 = 100;
/// 偏移量上限，保证能放进数据库的 BIGINT
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// 分页请求，page 从 1 开始
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// 缺省值取 default_size；page 至少为 1，page_size 限制在 1..=100
    pub fn new(page: Option<u64>, page_size: Option<u64>, default_size: u64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.page_size)
            .min(MAX_OFFSET)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            page: self.page,
            page_size: self.page_size,
            total,
            total_pages: total.div_ceil(self.page_size),
        }
    }

    /// 对已在内存中的完整列表切片
    pub fn slice<T>(&self, items: Vec<T>) -> (Vec<T>, Pagination) {
        let pagination = self.pagination(items.len() as u64);
        let page = items
            .into_iter()
            .skip(self.offset() as usize)
            .take(self.limit() as usize)
            .collect();
        (page, pagination)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let req = PageRequest::new(None, None, 10);
        assert_eq!(req, PageRequest { page: 1, page_size: 10 });

        let req = PageRequest::new(Some(0), Some(0), 20);
        assert_eq!(req, PageRequest { page: 1, page_size: 1 });

        let req = PageRequest::new(Some(3), Some(1000), 20);
        assert_eq!(req.page_size, MAX_PAGE_SIZE);
        assert_eq!(req.offset(), 200);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let req = PageRequest::new(Some(1), Some(10), 10);
        assert_eq!(req.pagination(0).total_pages, 0);
        assert_eq!(req.pagination(10).total_pages, 1);
        assert_eq!(req.pagination(11).total_pages, 2);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let req = PageRequest::new(Some(3), Some(2), 10);
        let (page, pagination) = req.slice(vec![1, 2, 3, 4, 5]);
        assert_eq!(page, vec![5]);
        assert_eq!(pagination.total, 5);
        assert_eq!(pagination.total_pages, 3);

        let req = PageRequest::new(Some(4), Some(2), 10);
        let (page, _) = req.slice(vec![1, 2, 3, 4, 5]);
        assert!(page.is_empty());
    }

    #[test]
    fn test_huge_page_yields_empty_page() {
        let req = PageRequest::new(Some(u64::MAX), Some(10), 10);
        assert_eq!(req.offset(), MAX_OFFSET);
        let (page, pagination) = req.slice(vec![1, 2, 3]);
        assert!(page.is_empty());
        assert_eq!(pagination.page, u64::MAX);
        assert_eq!(pagination.total, 3);
        assert_eq!(pagination.total_pages, 1);
    }
}
