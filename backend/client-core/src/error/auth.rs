//! Error types for login/logout.

use crate::error::api_client::ApiClientError;
use crate::error::token_store::TokenStoreError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

pub(crate) const DEFAULT_LOGIN_FAILURE: &str = "Invalid email or password";
pub(crate) const NETWORK_FAILURE: &str = "Network error. Please check your connection.";

#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("Invalid Credentials: HTTP {status} - {message} {location}")]
    InvalidCredentials {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Auth Network Error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
    },

    #[error("Not Authenticated: redirect to {login_path} {location}")]
    NotAuthenticated {
        login_path: String,
        location: ErrorLocation,
    },

    #[error("Malformed Auth Response: {message} {location}")]
    MalformedResponse {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    #[error(transparent)]
    Client(#[from] ApiClientError),
}

impl AuthError {
    #[track_caller]
    pub fn network() -> Self {
        AuthError::Network {
            message: NETWORK_FAILURE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_authenticated(login_path: impl Into<String>) -> Self {
        AuthError::NotAuthenticated {
            login_path: login_path.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text to show next to the login form.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials { message, .. } => message.clone(),
            AuthError::Network { message, .. } => message.clone(),
            AuthError::Client(inner) => inner.user_message(),
            _ => DEFAULT_LOGIN_FAILURE.to_string(),
        }
    }
}
