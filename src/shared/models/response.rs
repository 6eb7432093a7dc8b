use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::utils::pagination::PageParams;

/// Standard response envelope
/// 표준 응답 envelope: {success, message?, data?, error?}
///
/// Deserialize is derived as well so the API client can read the same
/// shape back off the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// 성공 응답 (데이터만)
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// 성공 응답 (메시지 + 데이터)
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// 성공 응답 (메시지만, 데이터 없음)
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }
}

/// Pagination metadata (응답용)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Paginated list envelope
/// 페이지네이션 목록 응답: {success, count, total, pagination, data}
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    /// Number of records in this page
    pub count: usize,
    /// Number of records matching the filter
    pub total: i64,
    pub pagination: PageInfo,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, total: i64, params: &PageParams) -> Self {
        Self {
            success: true,
            count: data.len(),
            total,
            pagination: PageInfo {
                page: params.page(),
                limit: params.limit(),
                total_pages: params.total_pages(total),
            },
            data,
        }
    }
}
