use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::error::ClientError;
use crate::client::token_store::{StoredTokens, TokenStore};
use crate::domains::auth::models::RefreshTokenResponse;
use crate::shared::models::ApiResponse;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client with the auth interceptor built in
/// 인증 인터셉터가 내장된 HTTP 클라이언트
///
/// Every request attaches the stored access token. On a 401 the client
/// refreshes the token pair once and replays the original request; a
/// second 401 is returned as-is. Concurrent 401s coalesce into a single
/// refresh call.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    /// 동시 401은 하나의 갱신 요청으로 합류
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
}

impl ApiClient {
    /// base_url은 prefix까지 포함 (예: http://localhost:5000/api/v1)
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            store,
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.load().is_some()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .execute(|| self.http.request(Method::GET, self.url(path)))
            .await?;
        Self::parse(response).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let response = self
            .execute(|| self.http.request(Method::GET, self.url(path)).query(query))
            .await?;
        Self::parse(response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .execute(|| self.http.request(Method::POST, self.url(path)).json(body))
            .await?;
        Self::parse(response).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .execute(|| self.http.request(Method::PUT, self.url(path)).json(body))
            .await?;
        Self::parse(response).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .execute(|| self.http.request(Method::PATCH, self.url(path)).json(body))
            .await?;
        Self::parse(response).await
    }

    pub(crate) async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .execute(|| self.http.request(Method::PATCH, self.url(path)))
            .await?;
        Self::parse(response).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .execute(|| self.http.request(Method::DELETE, self.url(path)))
            .await?;
        Self::parse(response).await
    }

    /// POST without the interceptor (로그인 등 비인증 요청)
    pub(crate) async fn post_unauthenticated<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::parse(response).await
    }

    /// Send a request with the interceptor applied
    /// 인터셉터 적용: 토큰 부착 → 401이면 갱신 후 1회 재시도
    pub(crate) async fn execute<F>(&self, build: F) -> Result<Response, ClientError>
    where
        F: Fn() -> RequestBuilder,
    {
        let token_used = self.store.load().map(|t| t.access_token);

        let response = self.send_with_token(build(), token_used.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("request rejected with 401, attempting token refresh");
        self.refresh_tokens(token_used.as_deref()).await?;

        let retry_token = self.store.load().map(|t| t.access_token);
        self.send_with_token(build(), retry_token.as_deref()).await
    }

    async fn send_with_token(
        &self,
        builder: RequestBuilder,
        token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let builder = match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        Ok(builder.send().await?)
    }

    /// Rotate the stored token pair through /auth/refresh-token
    /// 토큰 쌍 갱신 (실패 시 저장소를 비우고 SessionExpired)
    async fn refresh_tokens(&self, token_used: Option<&str>) -> Result<(), ClientError> {
        let _guard = self.refresh_gate.lock().await;

        // 락 대기 중 다른 요청이 이미 갱신을 끝냈으면 그대로 사용
        let current = self.store.load();
        if let (Some(current), Some(used)) = (&current, token_used) {
            if current.access_token != used {
                return Ok(());
            }
        }

        let Some(tokens) = current else {
            return Err(ClientError::SessionExpired);
        };

        let result = self
            .http
            .post(self.url("/auth/refresh-token"))
            .json(&serde_json::json!({ "refreshToken": tokens.refresh_token }))
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "token refresh rejected");
                self.store.clear();
                return Err(ClientError::SessionExpired);
            }
            Err(err) => {
                warn!("token refresh failed: {err}");
                self.store.clear();
                return Err(ClientError::SessionExpired);
            }
        };

        let refreshed: RefreshTokenResponse = response.json().await.map_err(|_| {
            self.store.clear();
            ClientError::SessionExpired
        })?;

        self.store.save(StoredTokens {
            access_token: refreshed.access_token,
            refresh_token: refreshed.refresh_token,
        })?;

        Ok(())
    }

    /// Decode the standard envelope, surfacing failures as ClientError::Api
    pub(crate) async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ApiResponse<serde_json::Value>>().await {
                Ok(envelope) => envelope
                    .message
                    .or(envelope.error)
                    .unwrap_or_else(|| "request failed".to_string()),
                Err(_) => "request failed".to_string(),
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
