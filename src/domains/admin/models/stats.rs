use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::task::models::Task;

/// Recent user entry for the stats dashboard (최근 가입자)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 사용자 통계 (상태/역할별 카운트)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub admins: i64,
    pub managers: i64,
    pub employees: i64,
}

/// 업무 통계 (상태별 카운트 + 완료율)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub unassigned: i64,
    /// completed / total * 100 (0 when there are no tasks)
    pub completion_rate: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentStats {
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecentActivity {
    pub users: Vec<RecentUser>,
    pub tasks: Vec<Task>,
}

/// System statistics (관리자 대시보드용 집계)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SystemStats {
    pub users: UserStats,
    pub tasks: TaskStats,
    pub departments: DepartmentStats,
    pub recent: RecentActivity,
}
