//! HTTP status code utilities for response classification.

/// HTTP status code for response categorization.
///
/// Stored directly rather than parsed from error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const OK: HttpStatusCode = HttpStatusCode(200);
    pub const CREATED: HttpStatusCode = HttpStatusCode(201);
    pub const NO_CONTENT: HttpStatusCode = HttpStatusCode(204);
    pub const UNAUTHORIZED: HttpStatusCode = HttpStatusCode(401);

    /// 2xx, including "created" and "no content".
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 401 - the only status that triggers a token refresh.
    pub fn is_unauthorized(&self) -> bool {
        self.0 == 401
    }

    /// 4xx client errors (validation and business failures).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
