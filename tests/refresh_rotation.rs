// Server-side refresh token rotation against a live database: a refresh
// revokes the presented token, a second use of it is rejected, and
// inactive accounts cannot refresh at all.
//
// These tests need Postgres. They are skipped unless DATABASE_URL is set:
//   DATABASE_URL=postgresql://... cargo test --test refresh_rotation

mod common;

use serde_json::json;

use ems_server::routes::create_router;
use ems_server::shared::database::Database;
use ems_server::shared::services::AppState;

use common::{spawn_server, test_config};

/// DATABASE_URL이 없으면 None (테스트 건너뜀)
async fn start_with_database() -> Option<(AppState, String)> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping database-backed test");
            return None;
        }
    };

    let db = Database::new(&url).await.expect("database connection");
    db.initialize().await.expect("migrations");

    let mut config = test_config(15);
    config.database.url = url;

    let state = AppState::new(db, config);
    let app = create_router().with_state(state.clone());
    let addr = spawn_server(app).await;

    Some((state, format!("http://{addr}/api/v1")))
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", rand::random::<u64>())
}

/// 가입 + 로그인 후 (access, refresh) 쌍 반환
async fn register_and_login(
    client: &reqwest::Client,
    base: &str,
    email: &str,
) -> (String, String) {
    let response = client
        .post(format!("{base}/auth/register"))
        .json(&json!({
            "firstName": "Rotation",
            "lastName": "Case",
            "email": email,
            "password": "password123",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": email, "password": "password123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    (
        body["accessToken"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}

async fn refresh(client: &reqwest::Client, base: &str, token: &str) -> reqwest::Response {
    client
        .post(format!("{base}/auth/refresh-token"))
        .json(&json!({ "refreshToken": token }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn refresh_rotates_pair_and_rejects_reuse_of_old_token() {
    let Some((_state, base)) = start_with_database().await else {
        return;
    };
    let client = reqwest::Client::new();
    let email = unique_email("rotation");

    let (_, old_refresh) = register_and_login(&client, &base, &email).await;

    // 회전: 새 쌍 발급
    let response = refresh(&client, &base, &old_refresh).await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let new_refresh = body["refreshToken"].as_str().unwrap().to_string();
    assert!(body["accessToken"].as_str().is_some());
    assert_ne!(new_refresh, old_refresh);

    // 이전 토큰 재사용은 거부 (회전 시 무효화됨)
    let response = refresh(&client, &base, &old_refresh).await;
    assert_eq!(response.status(), 401);

    // 새 토큰은 계속 회전 가능
    let response = refresh(&client, &base, &new_refresh).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn logged_out_token_cannot_refresh() {
    let Some((_state, base)) = start_with_database().await else {
        return;
    };
    let client = reqwest::Client::new();
    let email = unique_email("logout");

    let (_, refresh_token) = register_and_login(&client, &base, &email).await;

    let response = client
        .post(format!("{base}/auth/logout"))
        .json(&json!({ "refreshToken": refresh_token }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = refresh(&client, &base, &refresh_token).await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn inactive_account_cannot_refresh() {
    let Some((state, base)) = start_with_database().await else {
        return;
    };
    let client = reqwest::Client::new();
    let email = unique_email("inactive");

    let (_, refresh_token) = register_and_login(&client, &base, &email).await;

    // 계정 비활성화 (관리자 조치와 동일한 상태 전이)
    sqlx::query("UPDATE users SET status = 'inactive' WHERE email = $1")
        .bind(&email)
        .execute(state.db.pool())
        .await
        .expect("deactivate user");

    let response = refresh(&client, &base, &refresh_token).await;
    assert_eq!(response.status(), 403);
}
