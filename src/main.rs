use axum::http::{header, HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ems_server::domains::admin::models::*;
use ems_server::domains::auth::models::*;
use ems_server::domains::employee::models::*;
use ems_server::domains::message::models::*;
use ems_server::domains::task::models::*;
use ems_server::routes::create_router;
use ems_server::shared::config::AppConfig;
use ems_server::shared::database::{Database, RefreshTokenRepository};
use ems_server::shared::errors::ApiError;
use ems_server::shared::services::AppState;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        ems_server::domains::auth::handlers::auth_handler::login,
        ems_server::domains::auth::handlers::auth_handler::register,
        ems_server::domains::auth::handlers::auth_handler::refresh_token,
        ems_server::domains::auth::handlers::auth_handler::logout,
        ems_server::domains::auth::handlers::auth_handler::get_me,
        ems_server::domains::auth::handlers::auth_handler::change_password,
        ems_server::domains::auth::handlers::auth_handler::forgot_password,
        ems_server::domains::auth::handlers::auth_handler::reset_password,
        ems_server::domains::auth::handlers::auth_handler::verify_email,
        ems_server::domains::employee::handlers::employee_handler::get_employee,
        ems_server::domains::employee::handlers::employee_handler::update_profile,
        ems_server::domains::employee::handlers::employee_handler::update_employee,
        ems_server::domains::employee::handlers::employee_handler::department_members,
        ems_server::domains::task::handlers::task_handler::list_tasks,
        ems_server::domains::task::handlers::task_handler::my_tasks,
        ems_server::domains::task::handlers::task_handler::get_task,
        ems_server::domains::task::handlers::task_handler::create_task,
        ems_server::domains::task::handlers::task_handler::update_task,
        ems_server::domains::task::handlers::task_handler::delete_task,
        ems_server::domains::task::handlers::task_handler::assign_task,
        ems_server::domains::task::handlers::task_handler::update_task_status,
        ems_server::domains::message::handlers::message_handler::inbox,
        ems_server::domains::message::handlers::message_handler::get_message,
        ems_server::domains::message::handlers::message_handler::send_message,
        ems_server::domains::message::handlers::message_handler::mark_read,
        ems_server::domains::message::handlers::message_handler::delete_message,
        ems_server::domains::message::handlers::message_handler::conversation,
        ems_server::domains::message::handlers::message_handler::unread_count,
        ems_server::domains::admin::handlers::admin_handler::list_users,
        ems_server::domains::admin::handlers::admin_handler::create_user,
        ems_server::domains::admin::handlers::admin_handler::update_user,
        ems_server::domains::admin::handlers::admin_handler::delete_user,
        ems_server::domains::admin::handlers::admin_handler::list_departments,
        ems_server::domains::admin::handlers::admin_handler::create_department,
        ems_server::domains::admin::handlers::admin_handler::delete_department,
        ems_server::domains::admin::handlers::admin_handler::system_stats
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        RegisterRequest,
        RefreshTokenRequest,
        RefreshTokenResponse,
        LogoutRequest,
        ChangePasswordRequest,
        ForgotPasswordRequest,
        ResetPasswordRequest,
        VerifyEmailRequest,
        UserResponse,
        Role,
        UserStatus,
        UpdateProfileRequest,
        UpdateEmployeeRequest,
        Task,
        TaskStatus,
        TaskPriority,
        CreateTaskRequest,
        UpdateTaskRequest,
        AssignTaskRequest,
        UpdateTaskStatusRequest,
        Message,
        SendMessageRequest,
        UnreadCount,
        CreateUserRequest,
        UpdateUserRequest,
        Department,
        CreateDepartmentRequest,
        SystemStats,
        UserStats,
        TaskStats,
        DepartmentStats,
        RecentActivity,
        RecentUser
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication and session endpoints"),
        (name = "Employees", description = "Employee profile endpoints"),
        (name = "Tasks", description = "Task management endpoints"),
        (name = "Messages", description = "Internal messaging endpoints"),
        (name = "Admin", description = "User administration, departments, and statistics")
    ),
    info(
        title = "Employee Management System API",
        description = "REST API for employees, departments, tasks, and internal messaging",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ems_server=debug,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();

    // 운영 환경에서는 내부 오류 상세를 응답에 싣지 않음
    ApiError::set_expose_detail(!config.is_production());

    // DB 연결 및 마이그레이션
    let db = Database::new(&config.database.url).await?;
    db.initialize().await?;
    info!("database connected and migrated");

    let cors = build_cors(&config.server.cors_origin)?;
    let port = config.server.port;

    let app_state = AppState::new(db, config);

    spawn_token_cleanup(app_state.db.clone());

    let app = axum::Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "server listening");
    info!("Swagger UI available at http://localhost:{port}/api/docs");

    axum::serve(listener, app).await?;
    Ok(())
}

// 만료된 Refresh Token 정리 작업 (하루 주기)
// Expired rows are inert (refresh already rejects them); this just keeps
// the table from growing without bound.
fn spawn_token_cleanup(db: Database) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(24 * 60 * 60));
        loop {
            interval.tick().await;
            let repo = RefreshTokenRepository::new(db.pool().clone());
            match repo.delete_expired().await {
                Ok(deleted) if deleted > 0 => info!(deleted, "expired refresh tokens removed"),
                Ok(_) => {}
                Err(err) => tracing::warn!("refresh token cleanup failed: {err}"),
            }
        }
    });
}

// CORS 설정: "*"는 자격 증명 없이 모든 출처 허용, 그 외에는 지정 출처 + 쿠키 허용
fn build_cors(origin: &str) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    let cors = if origin == "*" {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origin.parse::<HeaderValue>()?)
            .allow_credentials(true)
    };

    Ok(cors)
}
