use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Department model (부서)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub manager_id: Option<u64>,
    pub created_by: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 부서 생성 요청
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    #[schema(example = "Engineering")]
    pub name: String,
    pub description: Option<String>,
    pub manager_id: Option<u64>,
}
