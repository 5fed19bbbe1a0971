//! Session lifecycle: login stores both tokens, logout always clears them.

use crate::helpers::{ACCESS_TOKEN, REFRESH_TOKEN, anonymous_client, bearer, logged_in_client};

use client_core::error::AuthError;
use client_core::{ApiClient, FileTokenStore, TokenStore};

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PATH: &str = "/api/v1/auth/login/";
const LOGOUT_PATH: &str = "/api/v1/auth/logout/";

async fn mount_login_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({"email": "admin@example.com", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": ACCESS_TOKEN, "refresh": REFRESH_TOKEN})),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// **VALUE**: Verifies login stores both tokens and authenticates the client.
#[tokio::test]
async fn given_valid_credentials_when_login_then_both_tokens_held() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;
    let (client, store) = anonymous_client(&server);

    client
        .login("admin@example.com", "secret")
        .await
        .expect("login");

    assert!(client.is_authenticated());
    assert!(client.require_auth().is_ok());
    assert_eq!(store.access_token().expect("access").as_str(), ACCESS_TOKEN);
    assert_eq!(store.refresh_token().expect("refresh").as_str(), REFRESH_TOKEN);
}

/// **VALUE**: Verifies the server `detail` is shown on a rejected login.
#[tokio::test]
async fn given_rejected_credentials_when_login_then_server_detail_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"detail": "No active account found with the given credentials"}),
        ))
        .mount(&server)
        .await;
    let (client, _store) = anonymous_client(&server);

    let error = client
        .login("admin@example.com", "wrong")
        .await
        .expect_err("rejected");

    assert!(matches!(error, AuthError::InvalidCredentials { .. }));
    assert_eq!(
        error.user_message(),
        "No active account found with the given credentials"
    );
    assert!(!client.is_authenticated());
}

/// **VALUE**: Verifies the default message when the server gives no detail.
///
/// **BUG THIS CATCHES**: Would catch a rejected login being sent down the
/// refresh path (there is no refresh token yet) or showing an empty message.
#[tokio::test]
async fn given_rejection_without_detail_when_login_then_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = anonymous_client(&server);

    let error = client.login("a@b.c", "x").await.expect_err("rejected");

    assert_eq!(error.user_message(), "Invalid email or password");
}

/// **VALUE**: Verifies an unreachable server yields the network message.
#[tokio::test]
async fn given_unreachable_server_when_login_then_network_error() {
    let store: Arc<dyn TokenStore> = Arc::new(client_core::MemoryTokenStore::new());
    let client = ApiClient::new("http://127.0.0.1:1", store).expect("client");

    let error = client.login("a@b.c", "x").await.expect_err("network");

    assert!(matches!(error, AuthError::Network { .. }));
    assert_eq!(
        error.user_message(),
        "Network error. Please check your connection."
    );
}

/// **VALUE**: Verifies a 2xx without tokens is reported as malformed.
#[tokio::test]
async fn given_success_without_tokens_when_login_then_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": "admin"})))
        .mount(&server)
        .await;
    let (client, _store) = anonymous_client(&server);

    let error = client.login("a@b.c", "x").await.expect_err("malformed");

    assert!(matches!(error, AuthError::MalformedResponse { .. }));
    assert!(!client.is_authenticated());
}

/// **VALUE**: Verifies logout revokes the refresh token with the bearer header.
#[tokio::test]
async fn given_logged_in_client_when_logout_then_server_revocation_acknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGOUT_PATH))
        .and(header("authorization", bearer(ACCESS_TOKEN).as_str()))
        .and(body_json(json!({"refresh": REFRESH_TOKEN})))
        .respond_with(ResponseTemplate::new(205))
        .expect(1)
        .mount(&server)
        .await;
    let (client, store) = logged_in_client(&server);

    let outcome = client.logout().await.expect("logout");

    assert!(outcome.server_acknowledged);
    assert_eq!(outcome.login_path, "login.html");
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
}

/// **VALUE**: Verifies logout clears credentials even when the server fails.
///
/// **WHY THIS MATTERS**: A user who clicks "log out" must be logged out locally,
/// whatever the backend says.
///
/// **BUG THIS CATCHES**: Would catch a server error aborting logout with tokens
/// still on disk.
#[tokio::test]
async fn given_server_failure_when_logout_then_credentials_still_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGOUT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let outcome = client.logout().await.expect("logout");

    assert!(!outcome.server_acknowledged);
    assert!(!client.is_authenticated());
    assert!(matches!(
        client.require_auth(),
        Err(AuthError::NotAuthenticated { .. })
    ));
}

/// **VALUE**: Verifies logging out without a session makes no server call.
#[tokio::test]
async fn given_anonymous_client_when_logout_then_no_server_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGOUT_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _store) = anonymous_client(&server);

    let outcome = client.logout().await.expect("logout");

    assert!(!outcome.server_acknowledged);
}

/// **VALUE**: Verifies a login persisted by one client is visible to the next process.
///
/// **WHY THIS MATTERS**: Each CLI invocation builds a fresh client from the token file.
#[tokio::test]
async fn given_file_store_when_login_then_new_client_is_authenticated() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;
    let dir = TempDir::new().expect("tempdir");
    let token_path = dir.path().join("tokens.json");

    let store = Arc::new(FileTokenStore::open(&token_path).expect("open"));
    let client = ApiClient::new(&server.uri(), store).expect("client");
    client
        .login("admin@example.com", "secret")
        .await
        .expect("login");

    let reopened = Arc::new(FileTokenStore::open(&token_path).expect("reopen"));
    let next_client = ApiClient::new(&server.uri(), reopened).expect("client");
    assert!(next_client.is_authenticated());
}
