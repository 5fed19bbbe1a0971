pub mod api_client;
pub mod auth;
pub mod config;
pub mod token_store;

pub use api_client::ApiClientError;
pub use auth::AuthError;
pub use config::ConfigError;
pub use token_store::TokenStoreError;

use models::ModelError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    ApiClient(#[from] ApiClientError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
