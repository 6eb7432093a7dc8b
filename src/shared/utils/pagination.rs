use serde::Deserialize;
use utoipa::IntoParams;

/// Default page size when `limit` is absent
pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound on page size
/// 한 페이지 최대 레코드 수
pub const MAX_LIMIT: u32 = 100;

/// Query-parameter driven pagination (page/limit → OFFSET/LIMIT)
/// 쿼리 파라미터 기반 페이지네이션
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// 1-based page number (default 1)
    pub page: Option<u32>,
    /// Records per page (default 10, max 100)
    pub limit: Option<u32>,
}

impl PageParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// SQL OFFSET 계산: (page - 1) * limit
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }

    pub fn total_pages(&self, total: i64) -> u32 {
        let limit = i64::from(self.limit());
        // ceil(total / limit)
        ((total + limit - 1) / limit).max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u32, limit: u32) -> PageParams {
        PageParams {
            page: Some(page),
            limit: Some(limit),
        }
    }

    #[test]
    fn defaults_to_first_page_of_ten() {
        let p = PageParams::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn page_two_of_twenty_five_records() {
        // page=2, limit=10 → records 11-20, totalPages=3
        let p = params(2, 10);
        assert_eq!(p.offset(), 10);
        assert_eq!(p.total_pages(25), 3);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(params(1, 0).limit(), 1);
        assert_eq!(params(1, 10_000).limit(), MAX_LIMIT);
        // page 0 normalizes to 1 instead of producing a negative offset
        assert_eq!(params(0, 10).offset(), 0);
    }

    #[test]
    fn total_pages_handles_exact_and_empty_sets() {
        let p = params(1, 10);
        assert_eq!(p.total_pages(30), 3);
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(1), 1);
    }
}
