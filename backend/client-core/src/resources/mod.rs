//! Typed operations over the inventory collections.
//!
//! Each submodule adds methods to [`ApiClient`](crate::ApiClient); they all
//! go through the unified verbs, so 401 recovery and error payloads behave
//! the same everywhere.

pub mod customers;
pub mod orders;
pub mod products;

pub use orders::OrderFormData;

const CURSOR_PARAM: &str = "cursor";

/// Collection path with `cursor` first, then any non-empty filters in order.
pub(crate) fn list_path(
    collection: &str,
    cursor: Option<&str>,
    filters: &[(&'static str, String)],
) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    let mut has_params = false;

    if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
        query.append_pair(CURSOR_PARAM, cursor);
        has_params = true;
    }

    for (key, value) in filters {
        query.append_pair(key, value);
        has_params = true;
    }

    if has_params {
        format!("{}?{}", collection, query.finish())
    } else {
        collection.to_string()
    }
}

/// `<collection><id>/`
pub(crate) fn detail_path(collection: &str, id: u64) -> String {
    format!("{}{}/", collection, id)
}
