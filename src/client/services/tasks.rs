use serde_json::json;

use crate::client::api_client::ApiClient;
use crate::client::error::ClientError;
use crate::domains::task::models::{
    AssignTaskRequest, CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest,
    UpdateTaskStatusRequest,
};
use crate::shared::models::{ApiResponse, ListResponse};

/// Task endpoints (업무 API)
impl ApiClient {
    pub async fn tasks<Q: serde::Serialize + ?Sized>(
        &self,
        query: &Q,
    ) -> Result<ListResponse<Task>, ClientError> {
        self.get_query("/tasks", query).await
    }

    /// 내게 할당된 업무
    pub async fn my_tasks(&self, page: u32, limit: u32) -> Result<ListResponse<Task>, ClientError> {
        self.get_query("/tasks/me", &json!({ "page": page, "limit": limit }))
            .await
    }

    pub async fn task(&self, id: u64) -> Result<ApiResponse<Task>, ClientError> {
        self.get(&format!("/tasks/{id}")).await
    }

    pub async fn create_task(
        &self,
        request: &CreateTaskRequest,
    ) -> Result<ApiResponse<Task>, ClientError> {
        self.post("/tasks", request).await
    }

    pub async fn update_task(
        &self,
        id: u64,
        request: &UpdateTaskRequest,
    ) -> Result<ApiResponse<Task>, ClientError> {
        self.put(&format!("/tasks/{id}"), request).await
    }

    pub async fn delete_task(&self, id: u64) -> Result<ApiResponse<()>, ClientError> {
        self.delete(&format!("/tasks/{id}")).await
    }

    pub async fn assign_task(
        &self,
        task_id: u64,
        user_id: u64,
    ) -> Result<ApiResponse<Task>, ClientError> {
        let request = AssignTaskRequest { user_id };
        self.post(&format!("/tasks/{task_id}/assign"), &request).await
    }

    pub async fn update_task_status(
        &self,
        task_id: u64,
        status: TaskStatus,
    ) -> Result<ApiResponse<Task>, ClientError> {
        let request = UpdateTaskStatusRequest { status };
        self.patch(&format!("/tasks/{task_id}/status"), &request).await
    }
}
