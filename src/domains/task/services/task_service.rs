use crate::domains::auth::models::user::UserStatus;
use crate::domains::task::models::{
    CreateTaskRequest, Task, TaskListQuery, TaskPriority, TaskStatus, UpdateTaskRequest,
};
use crate::shared::database::{Database, NewTask, TaskChanges, TaskFilter, TaskRepository, UserRepository};
use crate::shared::errors::ApiError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::utils::pagination::PageParams;

// 업무 서비스
// Task business logic (creation, assignment, status transitions)
#[derive(Clone)]
pub struct TaskService {
    db: Database,
}

impl TaskService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, query: &TaskListQuery) -> Result<(Vec<Task>, i64), ApiError> {
        let params = PageParams {
            page: query.page,
            limit: query.limit,
        };
        let filter = TaskFilter {
            status: query.status,
            priority: query.priority,
            assigned_to: query.assigned_to,
        };

        let repo = TaskRepository::new(self.db.pool().clone());
        let tasks = repo
            .list(&filter, params.limit(), params.offset())
            .await
            .map_err(|e| ApiError::db("Task", e))?;
        let total = repo
            .count(&filter)
            .await
            .map_err(|e| ApiError::db("Task", e))?;

        Ok((tasks, total))
    }

    /// 내 업무 목록 (할당 기준)
    pub async fn my_tasks(
        &self,
        user_id: u64,
        params: &PageParams,
    ) -> Result<(Vec<Task>, i64), ApiError> {
        let filter = TaskFilter {
            assigned_to: Some(user_id),
            ..Default::default()
        };

        let repo = TaskRepository::new(self.db.pool().clone());
        let tasks = repo
            .list(&filter, params.limit(), params.offset())
            .await
            .map_err(|e| ApiError::db("Task", e))?;
        let total = repo
            .count(&filter)
            .await
            .map_err(|e| ApiError::db("Task", e))?;

        Ok((tasks, total))
    }

    pub async fn get_task(&self, id: u64) -> Result<Task, ApiError> {
        let repo = TaskRepository::new(self.db.pool().clone());
        repo.find_by_id(id)
            .await
            .map_err(|e| ApiError::db("Task", e))?
            .ok_or(ApiError::NotFound { entity: "Task" })
    }

    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
        created_by: u64,
    ) -> Result<Task, ApiError> {
        if request.title.trim().is_empty() {
            return Err(ApiError::validation(vec!["title is required".to_string()]));
        }

        // 생성 시점에 할당 대상이 지정되면 존재/활성 확인
        if let Some(assignee) = request.assigned_to {
            self.ensure_active_user(assignee).await?;
        }

        let status = if request.assigned_to.is_some() {
            TaskStatus::InProgress
        } else {
            TaskStatus::Unassigned
        };

        let repo = TaskRepository::new(self.db.pool().clone());
        repo.create(NewTask {
            title: request.title.trim(),
            description: request.description.as_deref(),
            status,
            priority: request.priority.unwrap_or(TaskPriority::Medium),
            assigned_to: request.assigned_to,
            due_date: request.due_date,
            created_by,
        })
        .await
        .map_err(|e| ApiError::db("Task", e))
    }

    pub async fn update_task(
        &self,
        id: u64,
        request: UpdateTaskRequest,
        actor_id: u64,
    ) -> Result<Task, ApiError> {
        let repo = TaskRepository::new(self.db.pool().clone());
        repo.update(
            id,
            TaskChanges {
                title: request.title,
                description: request.description,
                priority: request.priority,
                due_date: request.due_date,
            },
            actor_id,
        )
        .await
        .map_err(|e| ApiError::db("Task", e))?
        .ok_or(ApiError::NotFound { entity: "Task" })
    }

    pub async fn delete_task(&self, id: u64) -> Result<(), ApiError> {
        let repo = TaskRepository::new(self.db.pool().clone());
        let deleted = repo.delete(id).await.map_err(|e| ApiError::db("Task", e))?;

        if deleted == 0 {
            return Err(ApiError::NotFound { entity: "Task" });
        }
        Ok(())
    }

    /// 업무 할당: 대상 사용자가 존재하고 활성 상태여야 함
    pub async fn assign_task(
        &self,
        task_id: u64,
        user_id: u64,
        actor_id: u64,
    ) -> Result<Task, ApiError> {
        self.ensure_active_user(user_id).await?;

        let repo = TaskRepository::new(self.db.pool().clone());
        repo.assign(task_id, user_id, actor_id)
            .await
            .map_err(|e| ApiError::db("Task", e))?
            .ok_or(ApiError::NotFound { entity: "Task" })
    }

    /// 상태 변경: 담당자 본인 또는 관리 권한만 허용
    /// Assignee, manager, or admin may move a task's status.
    pub async fn update_status(
        &self,
        task_id: u64,
        status: TaskStatus,
        actor: AuthenticatedUser,
    ) -> Result<Task, ApiError> {
        let repo = TaskRepository::new(self.db.pool().clone());
        let task = repo
            .find_by_id(task_id)
            .await
            .map_err(|e| ApiError::db("Task", e))?
            .ok_or(ApiError::NotFound { entity: "Task" })?;

        let is_assignee = task.assigned_to == Some(actor.user_id);
        if !is_assignee && !actor.role.is_manager() {
            return Err(ApiError::Forbidden);
        }

        repo.update_status(task_id, status, actor.user_id)
            .await
            .map_err(|e| ApiError::db("Task", e))?
            .ok_or(ApiError::NotFound { entity: "Task" })
    }

    async fn ensure_active_user(&self, user_id: u64) -> Result<(), ApiError> {
        let user_repo = UserRepository::new(self.db.pool().clone());
        let user = user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::NotFound { entity: "User" })?;

        if user.status == UserStatus::Inactive {
            return Err(ApiError::validation(vec![
                "cannot assign tasks to an inactive user".to_string(),
            ]));
        }
        Ok(())
    }
}
