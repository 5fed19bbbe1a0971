//! Request algorithm: bearer attachment, single refresh, single retry.

use crate::helpers::{
    ACCESS_TOKEN, REFRESH_TOKEN, REFRESHED_ACCESS_TOKEN, anonymous_client, bearer,
    logged_in_client,
};

use client_core::error::{ApiClientError, TokenStoreError};
use client_core::{
    ApiClient, CredentialPair, MemoryTokenStore, RequestDescriptor, RequestOutcome, TokenStore,
};

use common::{ErrorLocation, RedactedToken};

use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Method;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORDERS_PATH: &str = "/api/v1/orders/";
const REFRESH_PATH: &str = "/api/v1/auth/refresh/";

/// Store that holds its tokens in memory but cannot delete its backing copy.
struct StuckStore {
    inner: MemoryTokenStore,
}

impl TokenStore for StuckStore {
    fn access_token(&self) -> Option<RedactedToken> {
        self.inner.access_token()
    }

    fn refresh_token(&self) -> Option<RedactedToken> {
        self.inner.refresh_token()
    }

    fn set(&self, credentials: CredentialPair) -> Result<(), TokenStoreError> {
        self.inner.set(credentials)
    }

    fn set_access(&self, access: RedactedToken) -> Result<(), TokenStoreError> {
        self.inner.set_access(access)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.inner.clear()?;
        Err(TokenStoreError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: PathBuf::from("tokens.json"),
            source: std::io::Error::other("read-only filesystem"),
        })
    }
}

async fn mount_refresh(server: &MockServer, status: u16, body: Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .and(body_json(json!({"refresh": REFRESH_TOKEN})))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// **VALUE**: Verifies the stored access token is attached as a bearer header.
#[tokio::test]
async fn given_logged_in_client_when_request_then_bearer_header_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(header("authorization", bearer(ACCESS_TOKEN).as_str()))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let outcome = client
        .request(&RequestDescriptor::new(Method::GET, ORDERS_PATH))
        .await
        .expect("request");

    let response = outcome.into_response().expect("response");
    assert_eq!(response.status().as_u16(), 200);
}

/// **VALUE**: Verifies an expired token triggers exactly one refresh and one retry,
/// and the caller receives the retried response.
///
/// **WHY THIS MATTERS**: Access tokens expire constantly; users must never notice.
///
/// **BUG THIS CATCHES**: Would catch refresh loops, a retry still carrying the old
/// token, or the original 401 being returned instead of the retried response.
#[tokio::test]
async fn given_expired_access_token_when_request_then_refreshes_once_and_retries_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(header("authorization", bearer(ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, json!({"access": REFRESHED_ACCESS_TOKEN}), 1).await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(header("authorization", bearer(REFRESHED_ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    let (client, store) = logged_in_client(&server);

    let body: Value = client.get(ORDERS_PATH).await.expect("retried response");

    assert_eq!(body, json!({"ok": true}));
    assert_eq!(
        store.access_token().expect("access").as_str(),
        REFRESHED_ACCESS_TOKEN
    );
    assert_eq!(store.refresh_token().expect("refresh").as_str(), REFRESH_TOKEN);
}

/// **VALUE**: Verifies a retried request that fails again is returned, not retried again.
#[tokio::test]
async fn given_retry_also_unauthorized_when_request_then_no_second_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, json!({"access": REFRESHED_ACCESS_TOKEN}), 1).await;
    let (client, _store) = logged_in_client(&server);

    let outcome = client
        .request(&RequestDescriptor::new(Method::GET, ORDERS_PATH))
        .await
        .expect("request");

    let response = outcome.into_response().expect("response");
    assert_eq!(response.status().as_u16(), 401);
}

/// **VALUE**: Verifies a failed refresh clears credentials and signals login.
///
/// **WHY THIS MATTERS**: A revoked refresh token means the session is over; keeping
/// stale tokens would make every later call repeat the failed refresh.
///
/// **BUG THIS CATCHES**: Would catch the request being retried after the refresh
/// failed, or credentials surviving the failure.
#[tokio::test]
async fn given_failing_refresh_when_request_then_credentials_cleared_and_login_required() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 401, json!({"detail": "Token is blacklisted"}), 1).await;
    let (client, store) = logged_in_client(&server);

    let outcome = client
        .request(&RequestDescriptor::new(Method::GET, ORDERS_PATH))
        .await
        .expect("request");

    match outcome {
        RequestOutcome::LoginRequired { login_path } => assert_eq!(login_path, "login.html"),
        RequestOutcome::Response(response) => {
            panic!("expected login required, got HTTP {}", response.status())
        }
    }
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
}

/// **VALUE**: Verifies a storage failure while clearing does not hide the login signal.
///
/// **WHY THIS MATTERS**: The caller needs `LoginRequired` to send the user back to the
/// login page. A storage error in its place leaves the user stuck.
///
/// **BUG THIS CATCHES**: Would catch the clear error being propagated with `?`.
#[tokio::test]
async fn given_clear_fails_after_failed_refresh_when_request_then_login_required() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 401, json!({"detail": "Token is blacklisted"}), 1).await;
    let store: Arc<dyn TokenStore> = Arc::new(StuckStore {
        inner: MemoryTokenStore::with_credentials(CredentialPair::new(
            ACCESS_TOKEN,
            REFRESH_TOKEN,
        )),
    });
    let client = ApiClient::new(&server.uri(), Arc::clone(&store)).expect("client");

    let outcome = client
        .request(&RequestDescriptor::new(Method::GET, ORDERS_PATH))
        .await
        .expect("request");

    assert!(matches!(outcome, RequestOutcome::LoginRequired { .. }));
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
}

/// **VALUE**: Verifies verbs surface a failed refresh as `LoginRequired` with the
/// configured login path.
#[tokio::test]
async fn given_failing_refresh_when_get_then_login_required_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_refresh(&server, 400, json!({}), 1).await;
    let (client, _store) = logged_in_client(&server);
    let client = client.with_login_path("/login");

    let result: Result<Value, ApiClientError> = client.get(ORDERS_PATH).await;

    match result {
        Err(ApiClientError::LoginRequired { login_path, .. }) => assert_eq!(login_path, "/login"),
        other => panic!("expected LoginRequired, got {:?}", other),
    }
}

/// **VALUE**: Verifies a 401 without a refresh token is passed through untouched.
///
/// **BUG THIS CATCHES**: Would catch an anonymous 401 (e.g. a bad login) being
/// turned into a refresh attempt or a login redirect.
#[tokio::test]
async fn given_no_refresh_token_when_unauthorized_then_response_returned_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Authentication credentials were not provided."})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, json!({"access": "x"}), 0).await;
    let (client, _store) = anonymous_client(&server);

    let result: Result<Value, ApiClientError> = client.get(ORDERS_PATH).await;

    let error = result.expect_err("401 passes through");
    assert_eq!(error.status().map(|s| s.0), Some(401));
    assert_eq!(
        error.user_message(),
        "Authentication credentials were not provided."
    );
}

/// **VALUE**: Verifies non-401 failures never trigger a refresh.
#[tokio::test]
async fn given_forbidden_response_when_request_then_no_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, json!({"access": "x"}), 0).await;
    let (client, store) = logged_in_client(&server);

    let outcome = client
        .request(&RequestDescriptor::new(Method::GET, ORDERS_PATH))
        .await
        .expect("request");

    assert_eq!(outcome.into_response().expect("response").status().as_u16(), 403);
    assert_eq!(store.access_token().expect("access").as_str(), ACCESS_TOKEN);
}

/// **VALUE**: Verifies transport failures are reported, not retried, and keep credentials.
///
/// **BUG THIS CATCHES**: Would catch a network blip logging the user out.
#[tokio::test]
async fn given_unreachable_server_when_request_then_transport_error_and_tokens_kept() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_credentials(
        client_core::CredentialPair::new(ACCESS_TOKEN, REFRESH_TOKEN),
    ));
    let client = ApiClient::new("http://127.0.0.1:1", Arc::clone(&store)).expect("client");

    let result = client
        .request(&RequestDescriptor::new(Method::GET, ORDERS_PATH))
        .await;

    assert!(matches!(result, Err(ApiClientError::Transport { .. })));
    assert!(store.is_authenticated());
}

/// **VALUE**: Verifies concurrent expirations share a single refresh.
///
/// **WHY THIS MATTERS**: Pages fire several calls at once; without coalescing each
/// one would spend the refresh token, and rotating backends reject all but one.
///
/// **BUG THIS CATCHES**: Would catch a missing or ineffective refresh gate.
#[tokio::test]
async fn given_concurrent_expired_requests_when_sent_then_single_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(header("authorization", bearer(ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_refresh(&server, 200, json!({"access": REFRESHED_ACCESS_TOKEN}), 1).await;
    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(header("authorization", bearer(REFRESHED_ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);
    let other = client.clone();

    let (first, second) = tokio::join!(
        client.get::<Value>(ORDERS_PATH),
        other.get::<Value>(ORDERS_PATH)
    );

    assert_eq!(first.expect("first"), json!({"ok": true}));
    assert_eq!(second.expect("second"), json!({"ok": true}));
}

/// **VALUE**: Verifies `refresh` replaces only the access token.
#[tokio::test]
async fn given_valid_refresh_token_when_refresh_then_access_replaced() {
    let server = MockServer::start().await;
    mount_refresh(&server, 200, json!({"access": REFRESHED_ACCESS_TOKEN}), 1).await;
    let (client, store) = logged_in_client(&server);

    assert!(client.refresh().await);

    assert_eq!(
        store.access_token().expect("access").as_str(),
        REFRESHED_ACCESS_TOKEN
    );
    assert_eq!(store.refresh_token().expect("refresh").as_str(), REFRESH_TOKEN);
}

/// **VALUE**: Verifies a refresh response without `access` counts as failure.
#[tokio::test]
async fn given_malformed_refresh_response_when_refresh_then_false_and_tokens_untouched() {
    let server = MockServer::start().await;
    mount_refresh(&server, 200, json!({"unexpected": true}), 1).await;
    let (client, store) = logged_in_client(&server);

    assert!(!client.refresh().await);
    assert_eq!(store.access_token().expect("access").as_str(), ACCESS_TOKEN);
}
