// API client module (번들 API 클라이언트)
// A typed client for this API with the token interceptor built in,
// mirroring the behavior browser frontends get from an axios instance.

pub mod api_client;
pub mod error;
pub mod services;
pub mod token_store;

pub use api_client::ApiClient;
pub use error::ClientError;
pub use token_store::{FileTokenStore, MemoryTokenStore, StoredTokens, TokenStore};
