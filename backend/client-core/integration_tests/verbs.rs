//! Unified verb contract: 2xx decodes, everything else carries the server body.

use crate::helpers::{
    ACCESS_TOKEN, REFRESH_TOKEN, REFRESHED_ACCESS_TOKEN, bearer, logged_in_client,
};

use client_core::UploadForm;
use client_core::error::ApiClientError;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCTS_PATH: &str = "/api/v1/products/";
const IMPORT_PATH: &str = "/api/v1/products/import/";

/// **VALUE**: Verifies a failed POST surfaces the structured error body.
///
/// **WHY THIS MATTERS**: Form pages show field-level validation messages; they
/// need the server's payload, not just a status code.
///
/// **BUG THIS CATCHES**: Would catch POST discarding the body on failure.
#[tokio::test]
async fn given_validation_failure_when_post_then_api_error_carries_payload() {
    let server = MockServer::start().await;
    let payload = json!({"sku": ["product with this sku already exists."]});
    Mock::given(method("POST"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(&payload))
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let result: Result<Value, ApiClientError> =
        client.post(PRODUCTS_PATH, &json!({"sku": "SKU-1"})).await;

    let error = result.expect_err("validation failure");
    match &error {
        ApiClientError::Api { status, payload: body, .. } => {
            assert_eq!(status.0, 400);
            assert_eq!(body, &payload);
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert_eq!(
        error.user_message(),
        "Sku: product with this sku already exists."
    );
}

/// **VALUE**: Verifies PUT shares the POST failure contract.
///
/// **BUG THIS CATCHES**: Would catch the two verbs drifting apart again, with
/// PUT reporting a bare status line.
#[tokio::test]
async fn given_business_failure_when_put_then_api_error_carries_payload() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/orders/7/"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"non_field_errors": ["Insufficient stock for SKU-1"]})),
        )
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let error = client
        .put::<_, Value>("/api/v1/orders/7/", &json!({"status": "CONFIRMED"}))
        .await
        .expect_err("conflict");

    assert_eq!(error.status().map(|s| s.0), Some(409));
    assert_eq!(error.user_message(), "Insufficient stock for SKU-1");
}

/// **VALUE**: Verifies a non-JSON error body becomes an empty payload.
#[tokio::test]
async fn given_html_error_body_when_get_then_empty_object_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let error = client.get::<Value>(PRODUCTS_PATH).await.expect_err("502");

    match &error {
        ApiClientError::Api { payload, .. } => assert_eq!(payload, &json!({})),
        other => panic!("expected Api error, got {:?}", other),
    }
    assert_eq!(error.user_message(), "An error occurred");
}

/// **VALUE**: Verifies 201 Created decodes like any other success.
#[tokio::test]
async fn given_created_response_when_post_then_body_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PRODUCTS_PATH))
        .and(body_json(json!({"name": "Hammer"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5, "name": "Hammer"})))
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let created: Value = client
        .post(PRODUCTS_PATH, &json!({"name": "Hammer"}))
        .await
        .expect("created");

    assert_eq!(created["id"], 5);
}

/// **VALUE**: Verifies 204 No Content is a successful delete.
///
/// **BUG THIS CATCHES**: Would catch an empty body being parsed as JSON and failing.
#[tokio::test]
async fn given_no_content_response_when_delete_then_ok() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/products/5/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    client.delete("/api/v1/products/5/").await.expect("deleted");
}

/// **VALUE**: Verifies PATCH sends JSON and decodes the response.
#[tokio::test]
async fn given_partial_update_when_patch_then_body_sent_and_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/products/5/"))
        .and(body_json(json!({"stock_qty": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stock_qty": 3})))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let updated: Value = client
        .patch("/api/v1/products/5/", &json!({"stock_qty": 3}))
        .await
        .expect("patched");

    assert_eq!(updated["stock_qty"], 3);
}

/// **VALUE**: Verifies uploads are sent as multipart with a boundary.
#[tokio::test]
async fn given_upload_form_when_post_multipart_then_multipart_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMPORT_PATH))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(header("authorization", bearer(ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"imported": 2})))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);
    let form = UploadForm::new().file("file", "stock.csv", b"sku,qty\nA,1\nB,2\n".to_vec());

    let result: Value = client.post_multipart(IMPORT_PATH, form).await.expect("upload");

    assert_eq!(result["imported"], 2);
}

/// **VALUE**: Verifies an upload survives the refresh-and-retry path.
///
/// **WHY THIS MATTERS**: A multipart body is consumed on send; the retry must
/// rebuild it rather than send nothing.
///
/// **BUG THIS CATCHES**: Would catch uploads failing whenever the token expired.
#[tokio::test]
async fn given_expired_token_when_put_multipart_then_upload_retried_after_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(IMPORT_PATH))
        .and(header("authorization", bearer(ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh/"))
        .and(body_json(json!({"refresh": REFRESH_TOKEN})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": REFRESHED_ACCESS_TOKEN})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(IMPORT_PATH))
        .and(header("authorization", bearer(REFRESHED_ACCESS_TOKEN).as_str()))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"imported": 1})))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);
    let form = UploadForm::new()
        .text("mode", "replace")
        .file_with_mime("file", "stock.csv", b"sku,qty\nA,1\n".to_vec(), "text/csv");

    let result: Value = client.put_multipart(IMPORT_PATH, form).await.expect("upload");

    assert_eq!(result["imported"], 1);
}
