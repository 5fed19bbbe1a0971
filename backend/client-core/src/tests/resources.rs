// Unit tests for collection path construction

use crate::resources::{detail_path, list_path};
use crate::{ORDERS_ENDPOINT, PRODUCTS_ENDPOINT};
use models::{OrderFilters, OrderStatus, ProductFilters, StockStatus};

/// **VALUE**: Verifies a bare collection path when there is nothing to send.
#[test]
fn given_no_cursor_or_filters_when_list_path_then_no_query_string() {
    assert_eq!(list_path(PRODUCTS_ENDPOINT, None, &[]), "/api/v1/products/");
    assert_eq!(list_path(PRODUCTS_ENDPOINT, Some(""), &[]), "/api/v1/products/");
}

/// **VALUE**: Verifies the cursor comes first and filters follow in fixed order.
///
/// **WHY THIS MATTERS**: The server signs cursors; they must round-trip untouched
/// (percent-encoded once) alongside the active filters.
///
/// **BUG THIS CATCHES**: Would catch dropped filters when paging, or a cursor
/// containing `=` being sent unencoded.
#[test]
fn given_cursor_and_filters_when_list_path_then_cursor_first_and_encoded() {
    let filters = OrderFilters {
        search: Some("ORD 1".to_string()),
        status: Some(OrderStatus::Pending),
        ..Default::default()
    };

    let path = list_path(ORDERS_ENDPOINT, Some("cD0yMDI0="), &filters.query_pairs());

    assert_eq!(
        path,
        "/api/v1/orders/?cursor=cD0yMDI0%3D&search=ORD+1&status=PENDING"
    );
}

/// **VALUE**: Verifies empty filter values are not sent.
#[test]
fn given_empty_filter_values_when_list_path_then_omitted() {
    let filters = ProductFilters {
        search: Some(String::new()),
        stock_status: Some(StockStatus::LowStock),
        ..Default::default()
    };

    let path = list_path(PRODUCTS_ENDPOINT, None, &filters.query_pairs());

    assert_eq!(path, "/api/v1/products/?stock_status=LOW_STOCK");
}

#[test]
fn given_id_when_detail_path_then_trailing_slash() {
    assert_eq!(detail_path(ORDERS_ENDPOINT, 42), "/api/v1/orders/42/");
}
