use client_core::error::{ApiClientError, AuthError, ConfigError, TokenStoreError};

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_LOGIN_REQUIRED: u8 = 3;

/// Errors surfaced by CLI commands.
///
/// `message` is what the user sees; the `Display` form (with `detail` and
/// location) goes to the log file.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Error from this App
    #[error("Inventory Error: {message} {location}")]
    Inventory {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core (request, config, token storage)
    #[error("Core Error: {message} ({detail}) {location}")]
    Core {
        message: String,
        detail: String,
        location: ErrorLocation,
    },

    /// The session is gone; the user has to log in again
    #[error("Login Required: {login_path} {location}")]
    LoginRequired {
        login_path: String,
        location: ErrorLocation,
    },
}

impl InventoryError {
    #[track_caller]
    pub fn inventory(message: impl Into<String>) -> Self {
        InventoryError::Inventory {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    fn core(message: String, detail: String) -> Self {
        InventoryError::Core {
            message,
            detail,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            InventoryError::Inventory { message, .. } => message.clone(),
            InventoryError::Core { message, .. } => message.clone(),
            InventoryError::LoginRequired { .. } => {
                "Your session has expired. Run `inventory login` to sign in again.".to_string()
            }
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            InventoryError::LoginRequired { .. } => EXIT_LOGIN_REQUIRED,
            _ => EXIT_FAILURE,
        }
    }
}

impl From<ApiClientError> for InventoryError {
    #[track_caller]
    fn from(error: ApiClientError) -> Self {
        match error {
            ApiClientError::LoginRequired { login_path, .. } => InventoryError::LoginRequired {
                login_path,
                location: ErrorLocation::from(Location::caller()),
            },
            other => InventoryError::core(other.user_message(), other.to_string()),
        }
    }
}

impl From<AuthError> for InventoryError {
    #[track_caller]
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::NotAuthenticated { login_path, .. } => InventoryError::LoginRequired {
                login_path,
                location: ErrorLocation::from(Location::caller()),
            },
            AuthError::Client(inner) => InventoryError::from(inner),
            other => InventoryError::core(other.user_message(), other.to_string()),
        }
    }
}

impl From<ConfigError> for InventoryError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        InventoryError::core(
            "Configuration could not be loaded".to_string(),
            error.to_string(),
        )
    }
}

impl From<TokenStoreError> for InventoryError {
    #[track_caller]
    fn from(error: TokenStoreError) -> Self {
        InventoryError::core(
            "Stored credentials could not be read or written".to_string(),
            error.to_string(),
        )
    }
}
