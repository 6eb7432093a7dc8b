use crate::domains::auth::models::User;
use crate::domains::employee::models::{UpdateEmployeeRequest, UpdateProfileRequest};
use crate::shared::database::{
    Database, DepartmentRepository, ProfileChanges, UserChanges, UserRepository,
};
use crate::shared::errors::ApiError;

// 직원 서비스
// Employee profile and directory logic
#[derive(Clone)]
pub struct EmployeeService {
    db: Database,
}

impl EmployeeService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn get_employee(&self, id: u64) -> Result<User, ApiError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        user_repo
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::NotFound { entity: "User" })
    }

    /// 본인 프로필 수정 (이름/직책/전화번호만)
    pub async fn update_profile(
        &self,
        user_id: u64,
        request: UpdateProfileRequest,
    ) -> Result<User, ApiError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        user_repo
            .update_profile(
                user_id,
                ProfileChanges {
                    first_name: request.first_name,
                    last_name: request.last_name,
                    position: request.position,
                    phone_number: request.phone_number,
                },
            )
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::NotFound { entity: "User" })
    }

    /// 직원 정보 수정 (관리자/매니저)
    /// Email change re-checks uniqueness before touching the row.
    pub async fn update_employee(
        &self,
        id: u64,
        request: UpdateEmployeeRequest,
        actor_id: u64,
    ) -> Result<User, ApiError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        let current = user_repo
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::NotFound { entity: "User" })?;

        if let Some(email) = &request.email {
            if *email != current.email
                && user_repo
                    .find_by_email(email)
                    .await
                    .map_err(|e| ApiError::db("User", e))?
                    .is_some()
            {
                return Err(ApiError::Conflict("Email already in use".to_string()));
            }
        }

        user_repo
            .update(
                id,
                UserChanges {
                    first_name: request.first_name,
                    last_name: request.last_name,
                    email: request.email,
                    role: request.role,
                    status: None,
                    department_id: request.department_id,
                    position: request.position,
                    phone_number: request.phone_number,
                },
                actor_id,
            )
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::NotFound { entity: "User" })
    }

    /// 부서 구성원 목록
    pub async fn department_members(&self, department_id: u64) -> Result<Vec<User>, ApiError> {
        let dept_repo = DepartmentRepository::new(self.db.pool().clone());
        dept_repo
            .find_by_id(department_id)
            .await
            .map_err(|e| ApiError::db("Department", e))?
            .ok_or(ApiError::NotFound {
                entity: "Department",
            })?;

        let user_repo = UserRepository::new(self.db.pool().clone());
        user_repo
            .list_by_department(department_id)
            .await
            .map_err(|e| ApiError::db("User", e))
    }
}
