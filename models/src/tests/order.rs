// Unit tests for order payloads

use crate::{CustomerRef, NewOrder, Order, OrderStatus, OrderStatusUpdate};
use serde_json::json;

/// **VALUE**: Verifies the builder drops half-filled rows and keeps complete ones.
///
/// **WHY THIS MATTERS**: Order forms routinely contain an empty trailing row. Sending it
/// would produce a server validation error on `product_id`.
#[test]
fn given_rows_with_missing_fields_when_building_order_then_only_complete_rows_kept() {
    let order = NewOrder::builder(7)
        .with_item(3, 2, "9.99")
        .with_item(0, 1, "1.00")
        .with_item(4, 0, "5.00")
        .build()
        .unwrap();

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_id, 3);
}

/// **VALUE**: Verifies an order with no items is rejected before any request is made.
///
/// **BUG THIS CATCHES**: Would catch the empty-order check being removed from `validate()`.
#[test]
fn given_no_items_when_building_order_then_returns_validation_error() {
    let result = NewOrder::builder(7).with_item(0, 0, "0").build();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Please add at least one item"));
}

/// **VALUE**: Verifies a missing customer is rejected.
#[test]
fn given_zero_customer_when_validating_then_returns_validation_error() {
    let result = NewOrder::builder(0).with_item(1, 1, "1.00").build();

    assert!(result.unwrap_err().to_string().contains("Please select a customer"));
}

/// **VALUE**: Verifies the wire shape of the create body.
#[test]
fn given_new_order_when_serialized_then_matches_api_shape() {
    let order = NewOrder::builder(7).with_item(3, 2, "9.99").build().unwrap();

    let body = serde_json::to_value(&order).unwrap();

    assert_eq!(
        body,
        json!({"customer_id": 7, "items": [{"product_id": 3, "quantity": 2, "price": "9.99"}]})
    );
}

/// **VALUE**: Verifies statuses use the backend's SCREAMING_SNAKE_CASE names.
#[test]
fn given_status_update_when_serialized_then_uses_upper_case_name() {
    let body = serde_json::to_value(OrderStatusUpdate {
        status: OrderStatus::Confirmed,
    })
    .unwrap();

    assert_eq!(body, json!({"status": "CONFIRMED"}));
}

/// **VALUE**: Verifies list-shaped orders (no items, customer as display text) deserialize.
///
/// **BUG THIS CATCHES**: Would catch `items` becoming required, which breaks every list call.
#[test]
fn given_list_order_json_when_deserialized_then_items_default_empty() {
    let order: Order = serde_json::from_value(json!({
        "id": 1,
        "order_number": "ORD-0001",
        "customer": "Ada Lovelace",
        "order_date": "2026-01-02",
        "status": "PENDING",
        "total_amount": "19.98",
        "created_by": null
    }))
    .unwrap();

    assert_eq!(order.customer, CustomerRef::Name(String::from("Ada Lovelace")));
    assert!(order.items.is_empty());
    assert_eq!(order.total_amount.as_str(), "19.98");
}

/// **VALUE**: Verifies an order with a status this client does not know still decodes.
///
/// **WHY THIS MATTERS**: The backend can add statuses before clients are updated. One
/// unknown value must not turn a whole order list into a decode failure.
///
/// **BUG THIS CATCHES**: Would catch the `#[serde(other)]` fallback being dropped.
#[test]
fn given_page_with_unknown_status_when_deserialized_then_maps_to_unknown() {
    let page: crate::Page<Order> = serde_json::from_value(json!({
        "results": [
            {
                "id": 1,
                "order_number": "ORD-0001",
                "customer": "Ada Lovelace",
                "order_date": "2026-01-02",
                "status": "SHIPPED",
                "total_amount": "19.98"
            },
            {
                "id": 2,
                "order_number": "ORD-0002",
                "customer": 4,
                "order_date": "2026-01-03",
                "status": "CONFIRMED",
                "total_amount": "5.00"
            }
        ],
        "next": null,
        "previous": null
    }))
    .unwrap();

    assert_eq!(page.results[0].status, OrderStatus::Unknown);
    assert_eq!(page.results[1].status, OrderStatus::Confirmed);
}
