// Unit tests for cursor pagination
// Tests cursor extraction from next/previous links

use crate::{Page, extract_cursor};
use serde_json::json;

/// **VALUE**: Verifies the cursor value is pulled out of an absolute `next` link and decoded.
///
/// **WHY THIS MATTERS**: Cursors are opaque, base64-ish strings that arrive percent-encoded.
/// Passing the encoded form back would double-encode it and the server would reject the page.
///
/// **BUG THIS CATCHES**: Would catch returning the raw (encoded) query value.
#[test]
fn given_absolute_next_link_when_extracting_cursor_then_returns_decoded_value() {
    let link = "http://localhost:8000/api/v1/customers/?cursor=cD0yMDI0LTAx%3D%3D&page_size=20";

    assert_eq!(extract_cursor(link), Some(String::from("cD0yMDI0LTAx==")));
}

/// **VALUE**: Verifies server-relative links are handled too.
#[test]
fn given_relative_link_when_extracting_cursor_then_returns_value() {
    assert_eq!(
        extract_cursor("/api/v1/orders/?status=PENDING&cursor=abc"),
        Some(String::from("abc"))
    );
}

/// **VALUE**: Verifies links without a cursor yield nothing instead of garbage.
///
/// **BUG THIS CATCHES**: Would catch matching a parameter that merely ends in "cursor".
#[test]
fn given_link_without_cursor_when_extracting_then_returns_none() {
    assert_eq!(extract_cursor("http://localhost/api/v1/orders/?search=x"), None);
    assert_eq!(extract_cursor("http://localhost/api/v1/orders/?precursor=x"), None);
    assert_eq!(extract_cursor("http://localhost/api/v1/orders/?cursor="), None);
}

/// **VALUE**: Verifies a page deserializes from the list envelope and exposes both cursors.
///
/// **WHY THIS MATTERS**: First and last pages carry `null` links; those must map to
/// "no cursor" so the caller disables navigation in that direction.
#[test]
fn given_page_json_when_deserialized_then_exposes_cursors() {
    let page: Page<serde_json::Value> = serde_json::from_value(json!({
        "results": [{"id": 1}],
        "next": "http://localhost:8000/api/v1/products/?cursor=next123",
        "previous": null
    }))
    .unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.next_cursor(), Some(String::from("next123")));
    assert_eq!(page.previous_cursor(), None);
    assert!(!page.is_empty());
}
