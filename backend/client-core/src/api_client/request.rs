//! Per-call request descriptions and the outcome of a dispatch.

use crate::error::ApiClientError;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response};
use serde::Serialize;

/// One outbound call: `{method, path, headers, body?}`.
///
/// Built per call and never persisted. The body is kept in a re-sendable
/// form so the same descriptor can be dispatched again after a refresh.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized JSON document.
    Json(Vec<u8>),
    /// Multipart upload; content type and boundary are set by the form.
    Multipart(UploadForm),
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Descriptor carrying `body` serialized as JSON.
    #[track_caller]
    pub fn json<B: Serialize + ?Sized>(
        method: Method,
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, ApiClientError> {
        let bytes = serde_json::to_vec(body)?;
        Ok(Self::new(method, path).with_body(RequestBody::Json(bytes)))
    }

    pub fn multipart(method: Method, path: impl Into<String>, form: UploadForm) -> Self {
        Self::new(method, path).with_body(RequestBody::Multipart(form))
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Caller header. Overrides the default `Content-Type` when it names it.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self.body, Some(RequestBody::Multipart(_)))
    }
}

/// Result of [`crate::ApiClient::request`].
#[derive(Debug)]
pub enum RequestOutcome {
    /// A response was received; its status is whatever the server sent.
    Response(Response),
    /// The session could not be recovered. Credentials have been cleared and
    /// the hosting shell should send the user to `login_path`.
    LoginRequired { login_path: String },
}

impl RequestOutcome {
    #[track_caller]
    pub fn into_response(self) -> Result<Response, ApiClientError> {
        match self {
            RequestOutcome::Response(response) => Ok(response),
            RequestOutcome::LoginRequired { login_path } => {
                Err(ApiClientError::login_required(login_path))
            }
        }
    }

    pub fn is_login_required(&self) -> bool {
        matches!(self, RequestOutcome::LoginRequired { .. })
    }
}

/// Rebuildable multipart body.
///
/// `reqwest::multipart::Form` is consumed on send, so uploads are described
/// here and turned into a fresh form for every dispatch.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    fields: Vec<(String, UploadPart)>,
}

#[derive(Debug, Clone)]
enum UploadPart {
    Text(String),
    File {
        file_name: String,
        bytes: Vec<u8>,
        mime: Option<String>,
    },
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .push((name.into(), UploadPart::Text(value.into())));
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.fields.push((
            name.into(),
            UploadPart::File {
                file_name: file_name.into(),
                bytes: bytes.into(),
                mime: None,
            },
        ));
        self
    }

    pub fn file_with_mime(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        mime: impl Into<String>,
    ) -> Self {
        self.fields.push((
            name.into(),
            UploadPart::File {
                file_name: file_name.into(),
                bytes: bytes.into(),
                mime: Some(mime.into()),
            },
        ));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn to_form(&self) -> Result<Form, ApiClientError> {
        let mut form = Form::new();

        for (name, part) in &self.fields {
            form = match part {
                UploadPart::Text(value) => form.text(name.clone(), value.clone()),
                UploadPart::File {
                    file_name,
                    bytes,
                    mime,
                } => {
                    let mut file_part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                    if let Some(mime) = mime {
                        file_part = file_part.mime_str(mime)?;
                    }
                    form.part(name.clone(), file_part)
                }
            };
        }

        Ok(form)
    }
}
