use crate::HttpStatusCode;

/// **VALUE**: Verifies that "created" and "no content" count as success.
///
/// **WHY THIS MATTERS**: POST returns 201 and DELETE returns 204; treating either as a
/// failure would surface a bogus error after a successful write.
#[test]
fn given_2xx_codes_when_classified_then_all_are_success() {
    assert!(HttpStatusCode::OK.is_success());
    assert!(HttpStatusCode::CREATED.is_success());
    assert!(HttpStatusCode::NO_CONTENT.is_success());
    assert!(!HttpStatusCode(302).is_success());
    assert!(!HttpStatusCode(400).is_success());
}

/// **VALUE**: Verifies that only 401 is treated as an authorization failure.
///
/// **BUG THIS CATCHES**: Would catch refresh being triggered by 403 Forbidden.
#[test]
fn given_auth_related_codes_when_classified_then_only_401_is_unauthorized() {
    assert!(HttpStatusCode(401).is_unauthorized());
    assert!(!HttpStatusCode(403).is_unauthorized());
    assert!(HttpStatusCode(403).is_client_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(503).is_client_error());
}
