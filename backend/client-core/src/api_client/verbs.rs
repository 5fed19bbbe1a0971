//! Typed convenience operations layered on [`ApiClient::request`].
//!
//! All verbs share one failure contract: a non-2xx response becomes
//! [`ApiClientError::Api`] carrying the server's error body (parsed as JSON,
//! or an empty object when it is not JSON).

use super::ApiClient;
use super::request::{RequestDescriptor, UploadForm};
use crate::error::ApiClientError;

use common::HttpStatusCode;

use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

impl ApiClient {
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        let descriptor = RequestDescriptor::new(Method::GET, path);
        self.execute(&descriptor).await
    }

    /// Succeeds on any 2xx, including 201 Created.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let descriptor = RequestDescriptor::json(Method::POST, path, body)?;
        self.execute(&descriptor).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let descriptor = RequestDescriptor::json(Method::PUT, path, body)?;
        self.execute(&descriptor).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let descriptor = RequestDescriptor::json(Method::PATCH, path, body)?;
        self.execute(&descriptor).await
    }

    /// Succeeds on any 2xx, including 204 No Content.
    pub async fn delete(&self, path: &str) -> Result<(), ApiClientError> {
        let descriptor = RequestDescriptor::new(Method::DELETE, path);
        self.send_checked(&descriptor).await?;
        Ok(())
    }

    /// Multipart POST for file uploads. No JSON content type is sent.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: UploadForm,
    ) -> Result<T, ApiClientError> {
        let descriptor = RequestDescriptor::multipart(Method::POST, path, form);
        self.execute(&descriptor).await
    }

    /// Multipart PUT for file uploads. No JSON content type is sent.
    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: UploadForm,
    ) -> Result<T, ApiClientError> {
        let descriptor = RequestDescriptor::multipart(Method::PUT, path, form);
        self.execute(&descriptor).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ApiClientError> {
        let response = self.send_checked(descriptor).await?;
        decode_body(response).await
    }

    /// Send and map every non-2xx (or unrecoverable 401) to an error.
    async fn send_checked(&self, descriptor: &RequestDescriptor) -> Result<Response, ApiClientError> {
        let response = self.request(descriptor).await?.into_response()?;
        let status = HttpStatusCode::from(response.status().as_u16());

        if status.is_success() {
            return Ok(response);
        }

        let payload = error_payload(response).await;
        Err(ApiClientError::api(status, payload))
    }
}

/// Parse a failure body as JSON, falling back to an empty object.
pub(crate) async fn error_payload(response: Response) -> Value {
    match response.bytes().await {
        Ok(bytes) => {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(Map::new()))
        }
        Err(_) => Value::Object(Map::new()),
    }
}

/// Empty bodies decode as JSON `null`, so `()` and `Option<_>` targets work
/// for 204 responses.
async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiClientError> {
    let bytes = response.bytes().await?;

    if bytes.is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }

    Ok(serde_json::from_slice(&bytes)?)
}
