pub mod api_client;
pub mod auth;
pub mod config;
pub mod error;
pub mod error_normalizer;
pub mod resources;
pub mod token_store;

#[cfg(test)]
mod tests;

pub use api_client::ApiClient;
pub use api_client::request::{RequestBody, RequestDescriptor, RequestOutcome, UploadForm};
pub use auth::LogoutOutcome;
pub use config::ClientConfig;
pub use error::CoreError;
pub use error_normalizer::normalize;
pub use token_store::{CredentialPair, FileTokenStore, MemoryTokenStore, TokenStore};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOGIN_PATH: &str = "login.html";

pub const API_PREFIX: &str = "/api/v1/";
pub const LOGIN_ENDPOINT: &str = const_format::concatcp!(API_PREFIX, "auth/login/");
pub const REFRESH_ENDPOINT: &str = const_format::concatcp!(API_PREFIX, "auth/refresh/");
pub const LOGOUT_ENDPOINT: &str = const_format::concatcp!(API_PREFIX, "auth/logout/");
pub const CUSTOMERS_ENDPOINT: &str = const_format::concatcp!(API_PREFIX, "customers/");
pub const PRODUCTS_ENDPOINT: &str = const_format::concatcp!(API_PREFIX, "products/");
pub const ORDERS_ENDPOINT: &str = const_format::concatcp!(API_PREFIX, "orders/");
