use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// User role (역할: 라우트 접근 제어의 기준)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    /// Whether this role may manage tasks and other employees
    /// 업무/직원 관리 권한 여부 (admin 또는 manager)
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            other => Err(EnumParseError::new("role", other)),
        }
    }
}

/// Account status (활성/비활성)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(EnumParseError::new("status", other)),
        }
    }
}

/// Unknown enum value coming out of the database
#[derive(Debug, thiserror::Error)]
#[error("invalid {field} value: {value}")]
pub struct EnumParseError {
    field: &'static str,
    value: String,
}

impl EnumParseError {
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// User model (DB 저장용, 비밀번호 해시 포함)
/// Never serialized directly; API output goes through [`UserResponse`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
    pub department_id: Option<u64>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: bool,
    pub created_by: Option<u64>,
    pub updated_by: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User API representation (비밀번호 제외)
/// Password hash is stripped here; the invariant lives in this From impl.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub department_id: Option<u64>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            status: user.status,
            department_id: user.department_id,
            position: user.position,
            phone_number: user.phone_number,
            email_verified: user.email_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_db_text() {
        for role in [Role::Admin, Role::Manager, Role::Employee] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn manager_check_excludes_employee() {
        assert!(Role::Admin.is_manager());
        assert!(Role::Manager.is_manager());
        assert!(!Role::Employee.is_manager());
    }
}
