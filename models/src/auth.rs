//! Request/response bodies for the `/api/v1/auth/` endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/auth/login/`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login response.
#[derive(Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// Body of `POST /api/v1/auth/refresh/`.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Successful refresh response. Only the access token is rotated.
#[derive(Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Body of `POST /api/v1/auth/logout/`.
#[derive(Serialize)]
pub struct LogoutRequest<'a> {
    pub refresh: &'a str,
}
