// Unit tests for error module
// Tests mapping of core errors to what the user sees and the exit status

use crate::error::{EXIT_FAILURE, EXIT_LOGIN_REQUIRED, InventoryError};

use client_core::error::{ApiClientError, AuthError};
use common::HttpStatusCode;

use serde_json::json;

/// **VALUE**: Verifies an unrecoverable session maps to the login-required exit code.
///
/// **WHY THIS MATTERS**: Scripts wrapping the CLI detect "log in again" by exit code.
///
/// **BUG THIS CATCHES**: Would catch LoginRequired being flattened into a generic
/// core error.
#[test]
fn given_login_required_client_error_when_converted_then_login_required() {
    let error = InventoryError::from(ApiClientError::login_required("login.html"));

    match &error {
        InventoryError::LoginRequired { login_path, .. } => assert_eq!(login_path, "login.html"),
        other => panic!("expected LoginRequired, got {:?}", other),
    }
    assert_eq!(error.exit_code(), EXIT_LOGIN_REQUIRED);
    assert!(error.user_message().contains("inventory login"));
}

/// **VALUE**: Verifies the gate error from `require_auth` is treated the same way.
#[test]
fn given_not_authenticated_when_converted_then_login_required() {
    let error = InventoryError::from(AuthError::not_authenticated("login.html"));

    assert_eq!(error.exit_code(), EXIT_LOGIN_REQUIRED);
}

/// **VALUE**: Verifies API failures show the normalized server message.
///
/// **BUG THIS CATCHES**: Would catch raw JSON or error locations leaking to the user.
#[test]
fn given_api_error_when_converted_then_user_message_normalized() {
    let api_error = ApiClientError::api(
        HttpStatusCode(400),
        json!({"customer_id": ["This field is required."]}),
    );

    let error = InventoryError::from(api_error);

    assert_eq!(error.user_message(), "Customer Id: This field is required.");
    assert_eq!(error.exit_code(), EXIT_FAILURE);
    assert!(error.to_string().contains("HTTP 400"));
}

/// **VALUE**: Verifies wrapped client errors inside auth errors are unwrapped.
#[test]
fn given_auth_error_wrapping_login_required_when_converted_then_login_required() {
    let error = InventoryError::from(AuthError::from(ApiClientError::login_required("/login")));

    assert!(matches!(error, InventoryError::LoginRequired { .. }));
}
