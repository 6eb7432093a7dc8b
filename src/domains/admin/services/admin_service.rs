use tracing::info;

use crate::domains::admin::models::{
    CreateDepartmentRequest, CreateUserRequest, Department, DepartmentStats, RecentActivity,
    RecentUser, SystemStats, TaskStats, UpdateUserRequest, UserListQuery, UserStats,
};
use crate::domains::auth::models::user::{Role, User, UserStatus};
use crate::domains::auth::services::auth_service::{
    validate_email, validate_password, AuthService,
};
use crate::domains::task::models::TaskStatus;
use crate::shared::database::{
    Database, DepartmentRepository, NewUser, RefreshTokenRepository, TaskRepository,
    UserChanges, UserFilter, UserRepository,
};
use crate::shared::errors::ApiError;
use crate::shared::utils::pagination::PageParams;

// 관리자 서비스
// User administration, departments, and the stats dashboard.
#[derive(Clone)]
pub struct AdminService {
    db: Database,
}

impl AdminService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list_users(&self, query: &UserListQuery) -> Result<(Vec<User>, i64), ApiError> {
        let params = PageParams {
            page: query.page,
            limit: query.limit,
        };
        let filter = UserFilter {
            role: query.role,
            department_id: query.department,
            status: query.status,
            search: query.search.clone(),
        };

        let repo = UserRepository::new(self.db.pool().clone());
        let users = repo
            .list(&filter, params.limit(), params.offset())
            .await
            .map_err(|e| ApiError::db("User", e))?;
        let total = repo
            .count(&filter)
            .await
            .map_err(|e| ApiError::db("User", e))?;

        Ok((users, total))
    }

    pub async fn create_user(
        &self,
        request: CreateUserRequest,
        created_by: u64,
    ) -> Result<User, ApiError> {
        let mut errors = Vec::new();
        if request.first_name.trim().is_empty() {
            errors.push("firstName is required".to_string());
        }
        if request.last_name.trim().is_empty() {
            errors.push("lastName is required".to_string());
        }
        validate_email(&request.email, &mut errors);
        validate_password(&request.password, &mut errors);
        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        let repo = UserRepository::new(self.db.pool().clone());
        if repo
            .find_by_email(&request.email)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .is_some()
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        if let Some(dept_id) = request.department_id {
            self.ensure_department_exists(dept_id).await?;
        }

        let password_hash = AuthService::hash_password(&request.password)?;

        let user = repo
            .create(NewUser {
                first_name: request.first_name.trim(),
                last_name: request.last_name.trim(),
                email: &request.email,
                password_hash: &password_hash,
                role: request.role.unwrap_or(Role::Employee),
                department_id: request.department_id,
                position: request.position.as_deref(),
                phone_number: request.phone_number.as_deref(),
                created_by: Some(created_by),
            })
            .await
            .map_err(|e| ApiError::db("User", e))?;

        info!(user_id = user.id, email = %user.email, "admin created user");
        Ok(user)
    }

    pub async fn update_user(
        &self,
        id: u64,
        request: UpdateUserRequest,
        updated_by: u64,
    ) -> Result<User, ApiError> {
        let repo = UserRepository::new(self.db.pool().clone());

        // 이메일 변경 시 중복 확인
        if let Some(email) = &request.email {
            let mut errors = Vec::new();
            validate_email(email, &mut errors);
            if !errors.is_empty() {
                return Err(ApiError::validation(errors));
            }
            if let Some(existing) = repo
                .find_by_email(email)
                .await
                .map_err(|e| ApiError::db("User", e))?
            {
                if existing.id != id {
                    return Err(ApiError::Conflict("Email already in use".to_string()));
                }
            }
        }

        if let Some(dept_id) = request.department_id {
            self.ensure_department_exists(dept_id).await?;
        }

        let deactivated = request.status == Some(UserStatus::Inactive);

        let user = repo
            .update(
                id,
                UserChanges {
                    first_name: request.first_name,
                    last_name: request.last_name,
                    email: request.email,
                    role: request.role,
                    status: request.status,
                    department_id: request.department_id,
                    position: request.position,
                    phone_number: request.phone_number,
                },
                updated_by,
            )
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::NotFound { entity: "User" })?;

        // 비활성화된 계정은 더 이상 토큰 갱신 불가
        if deactivated {
            let token_repo = RefreshTokenRepository::new(self.db.pool().clone());
            token_repo
                .revoke_all_for_user(id)
                .await
                .map_err(|e| ApiError::db("RefreshToken", e))?;
        }

        Ok(user)
    }

    /// 사용자 삭제: 세션 폐기 후 할당 업무를 미할당으로 되돌림
    pub async fn delete_user(&self, id: u64, actor_id: u64) -> Result<(), ApiError> {
        if id == actor_id {
            return Err(ApiError::validation(vec![
                "cannot delete your own account".to_string(),
            ]));
        }

        let token_repo = RefreshTokenRepository::new(self.db.pool().clone());
        token_repo
            .revoke_all_for_user(id)
            .await
            .map_err(|e| ApiError::db("RefreshToken", e))?;

        let task_repo = TaskRepository::new(self.db.pool().clone());
        let unassigned = task_repo
            .unassign_all_for_user(id)
            .await
            .map_err(|e| ApiError::db("Task", e))?;

        let repo = UserRepository::new(self.db.pool().clone());
        let deleted = repo.delete(id).await.map_err(|e| ApiError::db("User", e))?;

        if deleted == 0 {
            return Err(ApiError::NotFound { entity: "User" });
        }

        info!(user_id = id, tasks_unassigned = unassigned, "admin deleted user");
        Ok(())
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, ApiError> {
        let repo = DepartmentRepository::new(self.db.pool().clone());
        repo.list().await.map_err(|e| ApiError::db("Department", e))
    }

    pub async fn create_department(
        &self,
        request: CreateDepartmentRequest,
        created_by: u64,
    ) -> Result<Department, ApiError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ApiError::validation(vec!["name is required".to_string()]));
        }

        let repo = DepartmentRepository::new(self.db.pool().clone());
        if repo
            .find_by_name(name)
            .await
            .map_err(|e| ApiError::db("Department", e))?
            .is_some()
        {
            return Err(ApiError::Conflict("Department already exists".to_string()));
        }

        if let Some(manager_id) = request.manager_id {
            let user_repo = UserRepository::new(self.db.pool().clone());
            user_repo
                .find_by_id(manager_id)
                .await
                .map_err(|e| ApiError::db("User", e))?
                .ok_or(ApiError::NotFound { entity: "User" })?;
        }

        repo.create(name, request.description.as_deref(), request.manager_id, created_by)
            .await
            .map_err(|e| ApiError::db("Department", e))
    }

    pub async fn delete_department(&self, id: u64) -> Result<(), ApiError> {
        // 구성원이 있는 부서는 삭제 불가
        let user_repo = UserRepository::new(self.db.pool().clone());
        let members = user_repo
            .list_by_department(id)
            .await
            .map_err(|e| ApiError::db("User", e))?;
        if !members.is_empty() {
            return Err(ApiError::validation(vec![
                "cannot delete a department with members".to_string(),
            ]));
        }

        let repo = DepartmentRepository::new(self.db.pool().clone());
        let deleted = repo.delete(id).await.map_err(|e| ApiError::db("Department", e))?;

        if deleted == 0 {
            return Err(ApiError::NotFound { entity: "Department" });
        }
        Ok(())
    }

    /// 시스템 통계 집계 (대시보드)
    pub async fn system_stats(&self) -> Result<SystemStats, ApiError> {
        let user_repo = UserRepository::new(self.db.pool().clone());
        let task_repo = TaskRepository::new(self.db.pool().clone());
        let dept_repo = DepartmentRepository::new(self.db.pool().clone());

        let db_err = |e| ApiError::db("Stats", e);

        let users = UserStats {
            total: user_repo.count_all().await.map_err(db_err)?,
            active: user_repo
                .count_by_status(UserStatus::Active)
                .await
                .map_err(db_err)?,
            inactive: user_repo
                .count_by_status(UserStatus::Inactive)
                .await
                .map_err(db_err)?,
            admins: user_repo.count_by_role(Role::Admin).await.map_err(db_err)?,
            managers: user_repo.count_by_role(Role::Manager).await.map_err(db_err)?,
            employees: user_repo.count_by_role(Role::Employee).await.map_err(db_err)?,
        };

        let total_tasks = task_repo.count_all().await.map_err(db_err)?;
        let completed = task_repo
            .count_by_status(TaskStatus::Completed)
            .await
            .map_err(db_err)?;
        let pending = task_repo
            .count_by_status(TaskStatus::InProgress)
            .await
            .map_err(db_err)?;
        let unassigned = task_repo
            .count_by_status(TaskStatus::Unassigned)
            .await
            .map_err(db_err)?;

        let completion_rate = if total_tasks > 0 {
            completed as f64 / total_tasks as f64 * 100.0
        } else {
            0.0
        };

        let tasks = TaskStats {
            total: total_tasks,
            completed,
            pending,
            unassigned,
            completion_rate,
        };

        let departments = DepartmentStats {
            total: dept_repo.count_all().await.map_err(db_err)?,
        };

        let recent_users = user_repo
            .recent(5)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|u| RecentUser {
                id: u.id,
                first_name: u.first_name,
                last_name: u.last_name,
                email: u.email,
                role: u.role.to_string(),
                created_at: u.created_at,
            })
            .collect();
        let recent_tasks = task_repo.recent(5).await.map_err(db_err)?;

        Ok(SystemStats {
            users,
            tasks,
            departments,
            recent: RecentActivity {
                users: recent_users,
                tasks: recent_tasks,
            },
        })
    }

    async fn ensure_department_exists(&self, id: u64) -> Result<(), ApiError> {
        let repo = DepartmentRepository::new(self.db.pool().clone());
        repo.find_by_id(id)
            .await
            .map_err(|e| ApiError::db("Department", e))?
            .ok_or(ApiError::NotFound { entity: "Department" })?;
        Ok(())
    }
}
