//! Typed collection operations against a mocked backend.

use crate::helpers::{customer_json, logged_in_client, order_json, page_json, product_json};

use client_core::error::ApiClientError;
use models::{
    CustomerPayload, CustomerRef, NewOrder, NewProduct, OrderFilters, OrderStatus, ProductFilters,
    StockStatus,
};

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies filters and cursor are sent and the next cursor is extracted.
///
/// **WHY THIS MATTERS**: Paging through filtered results must keep the filters.
///
/// **BUG THIS CATCHES**: Would catch the cursor being taken from the wrong query
/// parameter or left percent-encoded.
#[tokio::test]
async fn given_filters_and_cursor_when_list_orders_then_query_sent_and_next_cursor_parsed() {
    let server = MockServer::start().await;
    let next = format!("{}/api/v1/orders/?cursor=cD0yMDI0&status=PENDING", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .and(query_param("cursor", "abc="))
        .and(query_param("status", "PENDING"))
        .and(query_param("customer_id", "3"))
        .and(query_param_is_missing("search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![order_json(1, "PENDING")], Some(&next))),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);
    let filters = OrderFilters {
        search: Some(String::new()),
        status: Some(OrderStatus::Pending),
        customer_id: Some(3),
        ..Default::default()
    };

    let page = client
        .list_orders(Some("abc="), &filters)
        .await
        .expect("orders");

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].customer, CustomerRef::Name("Jane Doe".to_string()));
    assert_eq!(page.next_cursor().as_deref(), Some("cD0yMDI0"));
    assert!(page.previous_cursor().is_none());
}

/// **VALUE**: Verifies product pages decode prices given as strings or numbers.
#[tokio::test]
async fn given_product_filters_when_list_products_then_results_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .and(query_param("stock_status", "LOW_STOCK"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(vec![product_json(4)], None)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);
    let filters = ProductFilters {
        stock_status: Some(StockStatus::LowStock),
        ..Default::default()
    };

    let page = client.list_products(None, &filters).await.expect("products");

    let product = &page.results[0];
    assert_eq!(product.sku, "SKU-4");
    assert_eq!(product.cost_price.0, "5.00");
    assert_eq!(product.selling_price.0, "9.99");
    assert!(page.next_cursor().is_none());
}

/// **VALUE**: Verifies an order without items is rejected before any request.
///
/// **BUG THIS CATCHES**: Would catch local validation being skipped and an empty
/// order reaching the backend.
#[tokio::test]
async fn given_order_without_items_when_create_order_then_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/orders/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);
    let order = NewOrder {
        customer_id: 3,
        items: Vec::new(),
    };

    let error = client.create_order(&order).await.expect_err("no items");

    assert!(matches!(error, ApiClientError::Model(_)));
    assert_eq!(error.user_message(), "Please add at least one item");
}

/// **VALUE**: Verifies a valid order is posted with its items.
#[tokio::test]
async fn given_valid_order_when_create_order_then_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/orders/"))
        .and(body_json(json!({
            "customer_id": 3,
            "items": [{"product_id": 4, "quantity": 2, "price": "9.99"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(order_json(11, "PENDING")))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);
    let order = NewOrder::builder(3)
        .with_item(4, 2, "9.99")
        .with_item(0, 1, "1.00")
        .build()
        .expect("valid order");

    let created = client.create_order(&order).await.expect("created");

    assert_eq!(created.id, 11);
    assert_eq!(created.status, OrderStatus::Pending);
}

/// **VALUE**: Verifies status changes PUT only the status field.
#[tokio::test]
async fn given_order_when_update_status_then_put_status_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/orders/11/"))
        .and(body_json(json!({"status": "CONFIRMED"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(11, "CONFIRMED")))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let order = client
        .update_order_status(11, OrderStatus::Confirmed)
        .await
        .expect("updated");

    assert_eq!(order.status, OrderStatus::Confirmed);
}

/// **VALUE**: Verifies customer create and product update hit the right paths.
#[tokio::test]
async fn given_payloads_when_create_customer_and_update_product_then_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/customers/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(customer_json(8)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/products/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(4)))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let customer = client
        .create_customer(&CustomerPayload {
            email: "jane8@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            ..Default::default()
        })
        .await
        .expect("customer");
    let product = client
        .update_product(
            4,
            &models::ProductUpdate {
                name: "Hammer".to_string(),
                category: "Tools".to_string(),
                cost_price: "5.00".to_string(),
                selling_price: "9.99".to_string(),
                stock_qty: 12,
            },
        )
        .await
        .expect("product");

    assert_eq!(customer.full_name(), "Jane Doe");
    assert_eq!(product.id, 4);
}

/// **VALUE**: Verifies new products are posted including their SKU.
#[tokio::test]
async fn given_new_product_when_create_product_then_sku_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/products/"))
        .and(body_json(json!({
            "sku": "SKU-9",
            "name": "Saw",
            "category": "Tools",
            "cost_price": "7.00",
            "selling_price": "12.00",
            "stock_qty": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(product_json(9)))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let product = client
        .create_product(&NewProduct {
            sku: "SKU-9".to_string(),
            name: "Saw".to_string(),
            category: "Tools".to_string(),
            cost_price: "7.00".to_string(),
            selling_price: "12.00".to_string(),
            stock_qty: 1,
        })
        .await
        .expect("product");

    assert_eq!(product.sku, "SKU-9");
}

/// **VALUE**: Verifies order form data loads both collections.
#[tokio::test]
async fn given_backend_when_load_order_form_data_then_customers_and_products_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![customer_json(1), customer_json(2)], None)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(vec![product_json(4)], None)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let data = client.load_order_form_data().await.expect("form data");

    assert_eq!(data.customers.len(), 2);
    assert_eq!(data.products.len(), 1);
}

/// **VALUE**: Verifies one failing collection fails the whole form load.
#[tokio::test]
async fn given_products_failure_when_load_order_form_data_then_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let error = client.load_order_form_data().await.expect_err("failure");

    assert_eq!(error.user_message(), "boom");
}

/// **VALUE**: Verifies get and delete use detail paths.
#[tokio::test]
async fn given_id_when_get_and_delete_customer_then_detail_path_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json(2)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/customers/2/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _store) = logged_in_client(&server);

    let customer = client.get_customer(2).await.expect("customer");
    client.delete_customer(2).await.expect("deleted");

    assert_eq!(customer.id, 2);
}
