//! Shared fixtures for client integration tests.
//!
//! Each test starts its own `wiremock` server standing in for the inventory
//! backend and a client pointed at it.

use client_core::{ApiClient, CredentialPair, MemoryTokenStore, TokenStore};

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::MockServer;

pub const ACCESS_TOKEN: &str = "access-old";
pub const REFRESHED_ACCESS_TOKEN: &str = "access-new";
pub const REFRESH_TOKEN: &str = "refresh-1";

/// Client with an empty in-memory store.
pub fn anonymous_client(server: &MockServer) -> (ApiClient, Arc<dyn TokenStore>) {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(&server.uri(), Arc::clone(&store)).expect("client");
    (client, store)
}

/// Client whose store already holds `ACCESS_TOKEN` / `REFRESH_TOKEN`.
pub fn logged_in_client(server: &MockServer) -> (ApiClient, Arc<dyn TokenStore>) {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_credentials(
        CredentialPair::new(ACCESS_TOKEN, REFRESH_TOKEN),
    ));
    let client = ApiClient::new(&server.uri(), Arc::clone(&store)).expect("client");
    (client, store)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn order_json(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "order_number": format!("ORD-{:04}", id),
        "customer": "Jane Doe",
        "order_date": "2024-03-01",
        "status": status,
        "total_amount": "19.98",
        "created_by": "admin@example.com"
    })
}

pub fn customer_json(id: u64) -> Value {
    json!({
        "id": id,
        "customer_code": format!("C{:03}", id),
        "first_name": "Jane",
        "last_name": "Doe",
        "email": format!("jane{}@example.com", id),
        "opening_balance": "0.00"
    })
}

pub fn product_json(id: u64) -> Value {
    json!({
        "id": id,
        "sku": format!("SKU-{}", id),
        "name": "Hammer",
        "category": "Tools",
        "cost_price": "5.00",
        "selling_price": 9.99,
        "stock_qty": 12,
        "stock_status": "IN_STOCK"
    })
}

pub fn page_json(results: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "results": results,
        "next": next,
        "previous": null
    })
}
