//! Login/logout against `/api/v1/auth/`.
//!
//! Login stores the issued credential pair; logout always clears local
//! credentials, even when the server-side revocation fails.

use crate::api_client::ApiClient;
use crate::api_client::verbs::error_payload;
use crate::error::AuthError;
use crate::error::auth::DEFAULT_LOGIN_FAILURE;
use crate::token_store::CredentialPair;
use crate::{LOGIN_ENDPOINT, LOGOUT_ENDPOINT};

use common::{ErrorLocation, HttpStatusCode, RedactedToken};
use models::{LoginRequest, LogoutRequest, TokenPairResponse};

use std::panic::Location;

use log::{error, info, warn};
use serde_json::Value;

/// What happened during [`ApiClient::logout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// The server accepted the refresh-token revocation.
    pub server_acknowledged: bool,
    /// Where the hosting shell should navigate next.
    pub login_path: String,
}

impl ApiClient {
    /// Authenticate and store the issued access/refresh pair.
    ///
    /// # Errors
    ///
    /// * [`AuthError::InvalidCredentials`] - server rejected the login; carries the
    ///   server `detail` or "Invalid email or password"
    /// * [`AuthError::Network`] - no response received
    /// * [`AuthError::MalformedResponse`] - 2xx without a token pair
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let url = self.endpoint_url(LOGIN_ENDPOINT)?;
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self.http().post(url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Login request failed: {}", e);
                return Err(AuthError::network());
            }
        };

        let status = HttpStatusCode::from(response.status().as_u16());
        if !status.is_success() {
            let payload = error_payload(response).await;
            let message = payload
                .get("detail")
                .and_then(Value::as_str)
                .filter(|detail| !detail.is_empty())
                .unwrap_or(DEFAULT_LOGIN_FAILURE)
                .to_string();

            warn!("Login rejected: HTTP {}", status);
            return Err(AuthError::InvalidCredentials {
                status,
                message,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let pair: TokenPairResponse =
            response
                .json()
                .await
                .map_err(|e| AuthError::MalformedResponse {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        self.token_store()
            .set(CredentialPair::new(pair.access, pair.refresh))?;

        info!("Logged in; credentials stored");
        Ok(())
    }

    /// Revoke the refresh token server-side (best effort) and clear credentials.
    ///
    /// Server failures are logged and ignored; only a local storage failure
    /// is reported as an error.
    pub async fn logout(&self) -> Result<LogoutOutcome, AuthError> {
        let server_acknowledged = match self.token_store().refresh_token() {
            Some(refresh) => self.revoke(&refresh).await,
            None => false,
        };

        self.token_store().clear()?;
        info!("Logged out (server acknowledged: {})", server_acknowledged);

        Ok(LogoutOutcome {
            server_acknowledged,
            login_path: self.login_path().to_string(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token_store().is_authenticated()
    }

    /// Gate for operations that need a session.
    #[track_caller]
    pub fn require_auth(&self) -> Result<(), AuthError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AuthError::not_authenticated(self.login_path()))
        }
    }

    async fn revoke(&self, refresh: &RedactedToken) -> bool {
        let url = match self.endpoint_url(LOGOUT_ENDPOINT) {
            Ok(url) => url,
            Err(e) => {
                warn!("Logout call skipped: {}", e);
                return false;
            }
        };

        let mut request = self.http().post(url).json(&LogoutRequest {
            refresh: refresh.as_str(),
        });
        if let Some(access) = self.token_store().access_token() {
            request = request.bearer_auth(access.as_str());
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(
                    "Logout rejected by server (HTTP {}); clearing local credentials anyway",
                    response.status().as_u16()
                );
                false
            }
            Err(e) => {
                warn!("Logout request failed; clearing local credentials anyway: {}", e);
                false
            }
        }
    }
}
