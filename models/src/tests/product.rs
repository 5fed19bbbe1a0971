use crate::{OrderFilters, OrderStatus, ProductFilters, StockStatus};

/// **VALUE**: Verifies only populated filters become query parameters, in a fixed order.
///
/// **WHY THIS MATTERS**: Sending `category=` narrows results to products with an empty
/// category on some backends. Empty inputs must be omitted entirely.
#[test]
fn given_partial_product_filters_when_building_query_then_skips_empty_values() {
    let filters = ProductFilters {
        search: Some(String::from("bolt")),
        category: Some(String::new()),
        stock_status: Some(StockStatus::LowStock),
        min_price: None,
        max_price: Some(String::from("20")),
    };

    assert_eq!(
        filters.query_pairs(),
        vec![
            ("search", String::from("bolt")),
            ("stock_status", String::from("LOW_STOCK")),
            ("max_price", String::from("20")),
        ]
    );
}

/// **VALUE**: Verifies order filters serialize ids and statuses as the API expects.
#[test]
fn given_order_filters_when_building_query_then_formats_values() {
    let filters = OrderFilters {
        status: Some(OrderStatus::Cancelled),
        customer_id: Some(12),
        ..OrderFilters::default()
    };

    assert_eq!(
        filters.query_pairs(),
        vec![
            ("status", String::from("CANCELLED")),
            ("customer_id", String::from("12")),
        ]
    );
}

/// **VALUE**: Verifies no filters means no parameters.
#[test]
fn given_default_filters_when_building_query_then_empty() {
    assert!(ProductFilters::default().query_pairs().is_empty());
    assert!(OrderFilters::default().query_pairs().is_empty());
}

/// **VALUE**: Verifies a product with an unrecognised stock status still decodes.
///
/// **BUG THIS CATCHES**: Would catch `list_products` failing outright when the backend
/// introduces a new stock status.
#[test]
fn given_unknown_stock_status_when_deserialized_then_maps_to_unknown() {
    let product: crate::Product = serde_json::from_value(serde_json::json!({
        "id": 9,
        "sku": "SKU-9",
        "name": "Bolt",
        "category": "Hardware",
        "cost_price": "0.10",
        "selling_price": "0.25",
        "stock_qty": 0,
        "stock_status": "DISCONTINUED"
    }))
    .unwrap();

    assert_eq!(product.stock_status, Some(StockStatus::Unknown));
}

/// **VALUE**: Verifies an unknown status is never sent back as a filter value.
#[test]
fn given_unknown_status_filters_when_building_query_then_status_omitted() {
    let products = ProductFilters {
        stock_status: Some(StockStatus::Unknown),
        ..ProductFilters::default()
    };
    let orders = OrderFilters {
        status: Some(OrderStatus::Unknown),
        ..OrderFilters::default()
    };

    assert!(products.query_pairs().is_empty());
    assert!(orders.query_pairs().is_empty());
}
