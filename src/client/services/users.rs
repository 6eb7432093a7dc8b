use crate::client::api_client::ApiClient;
use crate::client::error::ClientError;
use crate::domains::admin::models::{
    CreateDepartmentRequest, CreateUserRequest, Department, SystemStats, UpdateUserRequest,
};
use crate::domains::auth::models::UserResponse;
use crate::domains::employee::models::{UpdateEmployeeRequest, UpdateProfileRequest};
use crate::shared::models::{ApiResponse, ListResponse};

/// Employee and admin user endpoints (직원/관리자 사용자 API)
impl ApiClient {
    pub async fn user(&self, id: u64) -> Result<ApiResponse<UserResponse>, ClientError> {
        self.get(&format!("/employees/{id}")).await
    }

    pub async fn update_my_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ClientError> {
        self.put("/employees/profile", request).await
    }

    pub async fn update_employee(
        &self,
        id: u64,
        request: &UpdateEmployeeRequest,
    ) -> Result<ApiResponse<UserResponse>, ClientError> {
        self.put(&format!("/employees/{id}"), request).await
    }

    pub async fn department_members(
        &self,
        department_id: u64,
    ) -> Result<ApiResponse<Vec<UserResponse>>, ClientError> {
        self.get(&format!("/employees/department/{department_id}"))
            .await
    }

    /// 사용자 목록 (관리자, 페이지네이션/필터)
    pub async fn users<Q: serde::Serialize + ?Sized>(
        &self,
        query: &Q,
    ) -> Result<ListResponse<UserResponse>, ClientError> {
        self.get_query("/admin/users", query).await
    }

    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ClientError> {
        self.post("/admin/users", request).await
    }

    pub async fn update_user(
        &self,
        id: u64,
        request: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ClientError> {
        self.put(&format!("/admin/users/{id}"), request).await
    }

    pub async fn delete_user(&self, id: u64) -> Result<ApiResponse<()>, ClientError> {
        self.delete(&format!("/admin/users/{id}")).await
    }

    pub async fn departments(&self) -> Result<ApiResponse<Vec<Department>>, ClientError> {
        self.get("/admin/departments").await
    }

    pub async fn create_department(
        &self,
        request: &CreateDepartmentRequest,
    ) -> Result<ApiResponse<Department>, ClientError> {
        self.post("/admin/departments", request).await
    }

    pub async fn delete_department(&self, id: u64) -> Result<ApiResponse<()>, ClientError> {
        self.delete(&format!("/admin/departments/{id}")).await
    }

    pub async fn system_stats(&self) -> Result<ApiResponse<SystemStats>, ClientError> {
        self.get("/admin/stats").await
    }
}
