//! Authenticated request client.
//!
//! Every call goes through [`ApiClient::request`], which attaches the current
//! access token and recovers once from an expired token:
//!
//! 1. dispatch with `Authorization: Bearer <access>` (when present)
//! 2. on 401 with a refresh token available, refresh exactly once
//! 3. on refresh success, re-dispatch exactly once and return that response
//! 4. on refresh failure, clear credentials and return
//!    [`RequestOutcome::LoginRequired`]
//!
//! Transport failures are never retried.

pub mod request;
pub(crate) mod verbs;

use crate::config::ClientConfig;
use crate::error::ApiClientError;
use crate::token_store::TokenStore;
use crate::{DEFAULT_LOGIN_PATH, REFRESH_ENDPOINT};

use common::{HttpStatusCode, RedactedToken};
use models::{RefreshRequest, RefreshResponse};

use request::{RequestBody, RequestDescriptor, RequestOutcome};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use tokio::sync::Mutex;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    tokens: Arc<dyn TokenStore>,
    login_path: String,
    /// Serializes refresh attempts across clones of this client.
    refresh_gate: Arc<Mutex<()>>,
}

impl ApiClient {
    /// Client against `base_url` with no request timeout.
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiClientError> {
        Self::build(base_url, tokens, None, DEFAULT_LOGIN_PATH)
    }

    /// Client configured from a loaded [`ClientConfig`].
    pub fn from_config(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiClientError> {
        Self::build(
            &config.api.base_url,
            tokens,
            config.timeout(),
            &config.api.login_path,
        )
    }

    fn build(
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        timeout: Option<Duration>,
        login_path: &str,
    ) -> Result<Self, ApiClientError> {
        Url::parse(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            tokens,
            login_path: login_path.to_string(),
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }

    /// Where the hosting shell should send the user when the session is gone.
    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, ApiClientError> {
        let url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Ok(Url::parse(&url)?)
    }

    /// Issue `descriptor`, recovering once from an expired access token.
    ///
    /// # Returns
    ///
    /// * `Ok(RequestOutcome::Response)` - any response, success or not
    /// * `Ok(RequestOutcome::LoginRequired)` - refresh failed, credentials cleared
    /// * `Err(ApiClientError)` - transport failure or unbuildable request
    pub async fn request(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<RequestOutcome, ApiClientError> {
        let sent_with = self.tokens.access_token();
        let response = self.dispatch(descriptor, sent_with.as_ref()).await?;

        if !HttpStatusCode::from(response.status().as_u16()).is_unauthorized() {
            return Ok(RequestOutcome::Response(response));
        }

        if self.tokens.refresh_token().is_none() {
            debug!(
                "{} {} returned 401 with no refresh token available",
                descriptor.method, descriptor.path
            );
            return Ok(RequestOutcome::Response(response));
        }

        if !self.refresh_after_rejection(sent_with.as_ref()).await {
            warn!(
                "Session expired during {} {}; credentials cleared, login required",
                descriptor.method, descriptor.path
            );
            if let Err(e) = self.tokens.clear() {
                error!("Failed to clear credentials after refresh failure: {}", e);
            }
            return Ok(RequestOutcome::LoginRequired {
                login_path: self.login_path.clone(),
            });
        }

        let current = self.tokens.access_token();
        let retried = self.dispatch(descriptor, current.as_ref()).await?;
        debug!(
            "{} {} retried after refresh: HTTP {}",
            descriptor.method,
            descriptor.path,
            retried.status().as_u16()
        );

        Ok(RequestOutcome::Response(retried))
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Only the access token is replaced. Any failure (non-2xx, transport,
    /// malformed body) returns `false` and leaves the stored tokens untouched.
    pub async fn refresh(&self) -> bool {
        let Some(refresh_token) = self.tokens.refresh_token() else {
            return false;
        };

        let url = match self.endpoint_url(REFRESH_ENDPOINT) {
            Ok(url) => url,
            Err(e) => {
                warn!("Token refresh skipped: {}", e);
                return false;
            }
        };

        let body = RefreshRequest {
            refresh: refresh_token.as_str(),
        };

        let response = match self.client.post(url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Token refresh request failed: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            warn!(
                "Token refresh rejected: HTTP {}",
                response.status().as_u16()
            );
            return false;
        }

        let refreshed: RefreshResponse = match response.json().await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                warn!("Token refresh returned an unreadable body: {}", e);
                return false;
            }
        };

        match self.tokens.set_access(RedactedToken::new(refreshed.access)) {
            Ok(()) => {
                info!("Access token refreshed");
                true
            }
            Err(e) => {
                warn!("Refreshed access token could not be stored: {}", e);
                false
            }
        }
    }

    /// Single-flight refresh: the first caller refreshes, later callers that
    /// were rejected with the same (now replaced) token reuse the result.
    async fn refresh_after_rejection(&self, rejected: Option<&RedactedToken>) -> bool {
        let _gate = self.refresh_gate.lock().await;

        let current = self.tokens.access_token();
        if current.is_some() && current.as_ref() != rejected {
            debug!("Access token already rotated by a concurrent refresh");
            return true;
        }

        self.refresh().await
    }

    async fn dispatch(
        &self,
        descriptor: &RequestDescriptor,
        access: Option<&RedactedToken>,
    ) -> Result<Response, ApiClientError> {
        let url = self.endpoint_url(&descriptor.path)?;
        debug!("{} {}", descriptor.method, url);

        let headers = build_headers(descriptor, access)?;
        let mut request = self
            .client
            .request(descriptor.method.clone(), url)
            .headers(headers);

        request = match &descriptor.body {
            Some(RequestBody::Json(bytes)) => request.body(bytes.clone()),
            Some(RequestBody::Multipart(form)) => request.multipart(form.to_form()?),
            None => request,
        };

        Ok(request.send().await?)
    }
}

/// JSON content type (except for multipart), caller headers on top, then
/// the bearer token when one is present.
pub(crate) fn build_headers(
    descriptor: &RequestDescriptor,
    access: Option<&RedactedToken>,
) -> Result<HeaderMap, ApiClientError> {
    let mut headers = HeaderMap::new();

    if !descriptor.is_multipart() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    }

    for (name, value) in &descriptor.headers {
        headers.insert(name.clone(), value.clone());
    }

    if let Some(token) = access {
        let mut value = HeaderValue::from_str(&token.bearer_header())?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
