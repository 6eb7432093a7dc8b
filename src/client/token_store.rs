use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::client::error::ClientError;

/// Storage keys, matching the browser localStorage convention
/// 토큰 저장 키 (localStorage 규약과 동일)
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Persisted token pair (저장된 토큰 쌍)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token persistence for the API client
/// 토큰 저장소: 메모리/파일 등 다양한 백엔드를 허용
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<StoredTokens>;
    fn save(&self, tokens: StoredTokens) -> Result<(), ClientError>;
    fn clear(&self);
}

/// In-memory store (tests and short-lived tools)
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<StoredTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredTokens> {
        self.tokens.lock().clone()
    }

    fn save(&self, tokens: StoredTokens) -> Result<(), ClientError> {
        *self.tokens.lock() = Some(tokens);
        Ok(())
    }

    fn clear(&self) {
        *self.tokens.lock() = None;
    }
}

/// File-backed store (JSON object with accessToken/refreshToken keys)
/// 파일 기반 저장소 (CLI 세션 유지용)
pub struct FileTokenStore {
    path: Mutex<PathBuf>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Mutex::new(path.into()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<StoredTokens> {
        let path = self.path.lock();
        let raw = fs::read_to_string(&*path).ok()?;
        let map: HashMap<String, String> = serde_json::from_str(&raw).ok()?;

        Some(StoredTokens {
            access_token: map.get(ACCESS_TOKEN_KEY)?.clone(),
            refresh_token: map.get(REFRESH_TOKEN_KEY)?.clone(),
        })
    }

    fn save(&self, tokens: StoredTokens) -> Result<(), ClientError> {
        let path = self.path.lock();
        let mut map = HashMap::new();
        map.insert(ACCESS_TOKEN_KEY, tokens.access_token);
        map.insert(REFRESH_TOKEN_KEY, tokens.refresh_token);

        let body = serde_json::to_string(&map).map_err(|e| ClientError::Api {
            status: 0,
            message: format!("failed to serialize tokens: {e}"),
        })?;

        fs::write(&*path, body).map_err(|e| ClientError::Api {
            status: 0,
            message: format!("failed to persist tokens: {e}"),
        })
    }

    fn clear(&self) {
        let path = self.path.lock();
        let _ = fs::remove_file(&*path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(access: &str, refresh: &str) -> StoredTokens {
        StoredTokens {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        }
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().is_none());

        store.save(pair("a1", "r1")).unwrap();
        assert_eq!(store.load().unwrap().access_token, "a1");

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("ems-tokens-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tokens.json");

        let store = FileTokenStore::new(&path);
        store.save(pair("a1", "r1")).unwrap();

        // 파일에는 localStorage 키 이름으로 기록된다
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("accessToken"));
        assert!(raw.contains("refreshToken"));

        let loaded = store.load().unwrap();
        assert_eq!(loaded, pair("a1", "r1"));

        store.clear();
        assert!(store.load().is_none());
    }
}
