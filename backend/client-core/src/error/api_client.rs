//! Error types for the request client.
//!
//! Variants follow the failure taxonomy of the client:
//! - `Transport`: no response received (DNS, refused connection, timeout)
//! - `LoginRequired`: 401 that could not be recovered by a refresh
//! - `Api`: any non-2xx response, with the server's error body attached
//! - everything else is an unexpected failure (bad URL, undecodable body, ...)

use crate::error::token_store::TokenStoreError;
use crate::error_normalizer::{UNEXPECTED_ERROR_MESSAGE, normalize};

use common::{ErrorLocation, HttpStatusCode};
use models::ModelError;

use std::panic::Location;

use serde_json::Value;
use thiserror::Error as ThisError;

const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

#[derive(Debug, ThisError)]
pub enum ApiClientError {
    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connect: bool,
        location: ErrorLocation,
    },

    #[error("Login Required: redirect to {login_path} {location}")]
    LoginRequired {
        login_path: String,
        location: ErrorLocation,
    },

    #[error("API Error: HTTP {status} - {payload} {location}")]
    Api {
        status: HttpStatusCode,
        payload: Value,
        location: ErrorLocation,
    },

    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Request Error: {message} {location}")]
    InvalidRequest {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Header Error: {message} {location}")]
    InvalidHeader {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ApiClientError {
    #[track_caller]
    pub fn login_required(login_path: impl Into<String>) -> Self {
        ApiClientError::LoginRequired {
            login_path: login_path.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api(status: HttpStatusCode, payload: Value) -> Self {
        ApiClientError::Api {
            status,
            payload,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            ApiClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_login_required(&self) -> bool {
        matches!(self, ApiClientError::LoginRequired { .. })
    }

    /// Single display string for the failure.
    ///
    /// Server error bodies go through the error normalizer; other failures
    /// get a fixed human message instead of internal detail.
    pub fn user_message(&self) -> String {
        match self {
            ApiClientError::Api { payload, .. } => normalize(payload),
            ApiClientError::Transport { .. } => NETWORK_ERROR_MESSAGE.to_string(),
            ApiClientError::LoginRequired { .. } => SESSION_EXPIRED_MESSAGE.to_string(),
            ApiClientError::Model(error) => error.message().to_string(),
            _ => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<url::ParseError> for ApiClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if error.is_builder() {
            return ApiClientError::InvalidRequest {
                message: error.to_string(),
                location,
            };
        }

        if error.is_decode() {
            return ApiClientError::Decode {
                message: error.to_string(),
                location,
            };
        }

        ApiClientError::Transport {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connect: error.is_connect(),
            location,
        }
    }
}

impl From<serde_json::Error> for ApiClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ApiClientError {
    #[track_caller]
    fn from(error: reqwest::header::InvalidHeaderValue) -> Self {
        ApiClientError::InvalidHeader {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
