// Client interceptor behavior against a scripted server: bearer attachment,
// one refresh-and-replay cycle on 401, session expiry on refresh failure,
// and coalescing of concurrent refresh attempts.

mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{json, Value};

use ems_server::client::{ApiClient, ClientError, MemoryTokenStore, StoredTokens, TokenStore};
use ems_server::domains::auth::models::user::{Role, UserResponse, UserStatus};

use common::spawn_server;

/// Scripted token backend for the mock server
struct MockServer {
    valid_access: Mutex<String>,
    valid_refresh: Mutex<String>,
    refresh_calls: AtomicUsize,
    me_calls: AtomicUsize,
    refresh_allowed: AtomicBool,
    /// true면 갱신 후에도 모든 요청에 401 응답
    always_reject: AtomicBool,
}

impl MockServer {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            valid_access: Mutex::new("access-1".to_string()),
            valid_refresh: Mutex::new("refresh-1".to_string()),
            refresh_calls: AtomicUsize::new(0),
            me_calls: AtomicUsize::new(0),
            refresh_allowed: AtomicBool::new(true),
            always_reject: AtomicBool::new(false),
        })
    }
}

fn sample_user() -> UserResponse {
    let now = Utc::now();
    UserResponse {
        id: 1,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: "test@example.com".to_string(),
        role: Role::Employee,
        status: UserStatus::Active,
        department_id: None,
        position: None,
        phone_number: None,
        email_verified: true,
        created_at: now,
        updated_at: now,
    }
}

async fn me(
    State(server): State<Arc<MockServer>>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    server.me_calls.fetch_add(1, Ordering::SeqCst);

    let unauthorized = (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Authentication required" })),
    );

    if server.always_reject.load(Ordering::SeqCst) {
        return Err(unauthorized);
    }

    let expected = format!("Bearer {}", server.valid_access.lock());
    let presented = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if presented != expected {
        return Err(unauthorized);
    }

    Ok(Json(json!({
        "success": true,
        "data": sample_user(),
    })))
}

async fn refresh(
    State(server): State<Arc<MockServer>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let call = server.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;

    let rejected = (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Invalid refresh token" })),
    );

    if !server.refresh_allowed.load(Ordering::SeqCst) {
        return Err(rejected);
    }

    let presented = body["refreshToken"].as_str().unwrap_or_default();
    if presented != *server.valid_refresh.lock() {
        return Err(rejected);
    }

    // 토큰 회전: 이전 쌍은 무효화
    let access = format!("access-{}", call + 1);
    let refresh = format!("refresh-{}", call + 1);
    *server.valid_access.lock() = access.clone();
    *server.valid_refresh.lock() = refresh.clone();

    Ok(Json(json!({
        "success": true,
        "message": "Token refreshed successfully",
        "accessToken": access,
        "refreshToken": refresh,
    })))
}

async fn start_mock() -> (Arc<MockServer>, ApiClient, Arc<MemoryTokenStore>) {
    let server = MockServer::new();

    let app = Router::new()
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/auth/refresh-token", post(refresh))
        .with_state(server.clone());

    let addr = spawn_server(app).await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(
        format!("http://{addr}/api/v1"),
        store.clone() as Arc<dyn TokenStore>,
    )
    .expect("client");

    (server, client, store)
}

fn seed(store: &MemoryTokenStore, access: &str, refresh: &str) {
    store
        .save(StoredTokens {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        })
        .unwrap();
}

#[tokio::test]
async fn valid_token_is_attached_and_accepted() {
    let (server, client, store) = start_mock().await;
    seed(&store, "access-1", "refresh-1");

    let response = client.current_user().await.unwrap();

    assert!(response.success);
    assert_eq!(response.data.unwrap().email, "test@example.com");
    assert_eq!(server.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stale_token_triggers_one_refresh_and_replay() {
    let (server, client, store) = start_mock().await;
    seed(&store, "stale-access", "refresh-1");

    let response = client.current_user().await.unwrap();

    assert!(response.success);
    assert_eq!(server.refresh_calls.load(Ordering::SeqCst), 1);
    // 원래 요청 + 재시도
    assert_eq!(server.me_calls.load(Ordering::SeqCst), 2);

    // 회전된 쌍이 저장됨
    let tokens = store.load().unwrap();
    assert_eq!(tokens.access_token, "access-2");
    assert_eq!(tokens.refresh_token, "refresh-2");
}

#[tokio::test]
async fn refresh_failure_clears_tokens_and_reports_session_expired() {
    let (server, client, store) = start_mock().await;
    seed(&store, "stale-access", "refresh-1");
    server.refresh_allowed.store(false, Ordering::SeqCst);

    let err = client.current_user().await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert!(store.load().is_none());
}

#[tokio::test]
async fn missing_tokens_reports_session_expired_without_refresh_call() {
    let (server, client, _store) = start_mock().await;

    let err = client.current_user().await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert_eq!(server.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn persistent_401_after_refresh_is_not_retried_again() {
    let (server, client, store) = start_mock().await;
    seed(&store, "access-1", "refresh-1");
    server.always_reject.store(true, Ordering::SeqCst);

    let err = client.current_user().await.unwrap_err();

    // 갱신은 1회만, 두 번째 401은 그대로 반환
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
    assert_eq!(server.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(server.me_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn concurrent_401s_coalesce_into_a_single_refresh() {
    let (server, client, store) = start_mock().await;
    seed(&store, "stale-access", "refresh-1");

    let mut handles = Vec::new();
    for _ in 0..5 {
        let client = client.clone();
        handles.push(tokio::spawn(async move { client.current_user().await }));
    }

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert!(response.success);
    }

    assert_eq!(server.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.load().unwrap().access_token, "access-2");
}
