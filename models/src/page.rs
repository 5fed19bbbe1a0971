//! Cursor-paginated list responses.

use serde::{Deserialize, Serialize};
use url::Url;

const CURSOR_PARAM: &str = "cursor";

/// One page of a cursor-paginated collection: `{results, next, previous}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Page<T> {
    /// Cursor to pass back for the following page, if any.
    pub fn next_cursor(&self) -> Option<String> {
        self.next.as_deref().and_then(extract_cursor)
    }

    /// Cursor to pass back for the preceding page, if any.
    pub fn previous_cursor(&self) -> Option<String> {
        self.previous.as_deref().and_then(extract_cursor)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Extract the decoded `cursor` query value from a pagination link.
///
/// Accepts absolute URLs and server-relative links (`/api/v1/orders/?cursor=..`).
pub fn extract_cursor(link: &str) -> Option<String> {
    let parsed = match Url::parse(link) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/").ok()?.join(link).ok()?
        }
        Err(_) => return None,
    };

    parsed
        .query_pairs()
        .find(|(key, _)| key == CURSOR_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
