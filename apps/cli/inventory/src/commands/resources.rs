use super::to_output;
use crate::cli::{CustomersCommand, OrdersCommand, ProductsCommand};
use crate::error::InventoryError;
use crate::state::AppState;

use models::{NewOrder, OrderStatus, Page};

use serde::Serialize;
use serde_json::{Value, json};

/// A page as printed: results plus the cursors to pass back with `--cursor`.
#[derive(Debug, Serialize)]
struct PageView<'a, T> {
    results: &'a [T],
    next_cursor: Option<String>,
    previous_cursor: Option<String>,
}

fn page_output<T: Serialize>(page: &Page<T>) -> Result<Value, InventoryError> {
    to_output(&PageView {
        results: &page.results,
        next_cursor: page.next_cursor(),
        previous_cursor: page.previous_cursor(),
    })
}

fn deleted(kind: &str, id: u64) -> Value {
    json!({ "deleted": kind, "id": id })
}

pub async fn customers(state: &AppState, command: CustomersCommand) -> Result<Value, InventoryError> {
    let client = state.client();
    client.require_auth()?;

    match command {
        CustomersCommand::List { cursor } => {
            page_output(&client.list_customers(cursor.as_deref()).await?)
        }
        CustomersCommand::Show { id } => to_output(&client.get_customer(id).await?),
        CustomersCommand::Create { fields } => {
            to_output(&client.create_customer(&fields.into()).await?)
        }
        CustomersCommand::Update { id, fields } => {
            to_output(&client.update_customer(id, &fields.into()).await?)
        }
        CustomersCommand::Delete { id } => {
            client.delete_customer(id).await?;
            Ok(deleted("customer", id))
        }
    }
}

pub async fn products(state: &AppState, command: ProductsCommand) -> Result<Value, InventoryError> {
    let client = state.client();
    client.require_auth()?;

    match command {
        ProductsCommand::List { cursor, filters } => {
            let page = client
                .list_products(cursor.as_deref(), &filters.into())
                .await?;
            page_output(&page)
        }
        ProductsCommand::Show { id } => to_output(&client.get_product(id).await?),
        ProductsCommand::Create { sku, fields } => {
            to_output(&client.create_product(&fields.into_new_product(sku)).await?)
        }
        ProductsCommand::Update { id, fields } => {
            to_output(&client.update_product(id, &fields.into()).await?)
        }
        ProductsCommand::Delete { id } => {
            client.delete_product(id).await?;
            Ok(deleted("product", id))
        }
    }
}

pub async fn orders(state: &AppState, command: OrdersCommand) -> Result<Value, InventoryError> {
    let client = state.client();
    client.require_auth()?;

    match command {
        OrdersCommand::List { cursor, filters } => {
            let page = client.list_orders(cursor.as_deref(), &filters.into()).await?;
            page_output(&page)
        }
        OrdersCommand::Show { id } => to_output(&client.get_order(id).await?),
        OrdersCommand::Create { customer, items } => {
            let order = items
                .into_iter()
                .fold(NewOrder::builder(customer), |builder, item| {
                    builder.with_item(item.product_id, item.quantity, item.price)
                })
                .build()
                .map_err(|e| InventoryError::inventory(e.message()))?;
            to_output(&client.create_order(&order).await?)
        }
        OrdersCommand::SetStatus { id, status } => {
            let order = client
                .update_order_status(id, OrderStatus::from(status))
                .await?;
            to_output(&order)
        }
        OrdersCommand::Delete { id } => {
            client.delete_order(id).await?;
            Ok(deleted("order", id))
        }
        OrdersCommand::FormData => {
            let data = client.load_order_form_data().await?;
            to_output(&json!({
                "customers": data.customers,
                "products": data.products,
            }))
        }
    }
}
