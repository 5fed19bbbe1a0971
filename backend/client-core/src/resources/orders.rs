use super::{detail_path, list_path};
use crate::ORDERS_ENDPOINT;
use crate::api_client::ApiClient;
use crate::error::ApiClientError;

use models::{
    Customer, NewOrder, Order, OrderFilters, OrderStatus, OrderStatusUpdate, Page, Product,
    ProductFilters,
};

use log::debug;

/// First page of customers and products, as needed to fill an order form.
#[derive(Debug, Clone)]
pub struct OrderFormData {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
}

impl ApiClient {
    pub async fn list_orders(
        &self,
        cursor: Option<&str>,
        filters: &OrderFilters,
    ) -> Result<Page<Order>, ApiClientError> {
        let path = list_path(ORDERS_ENDPOINT, cursor, &filters.query_pairs());
        self.get(&path).await
    }

    /// Detail view, including line items.
    pub async fn get_order(&self, id: u64) -> Result<Order, ApiClientError> {
        self.get(&detail_path(ORDERS_ENDPOINT, id)).await
    }

    /// Validated locally first; an order without items never reaches the server.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiClientError> {
        order.validate()?;
        self.post(ORDERS_ENDPOINT, order).await
    }

    pub async fn update_order_status(
        &self,
        id: u64,
        status: OrderStatus,
    ) -> Result<Order, ApiClientError> {
        let body = OrderStatusUpdate { status };
        self.put(&detail_path(ORDERS_ENDPOINT, id), &body).await
    }

    pub async fn delete_order(&self, id: u64) -> Result<(), ApiClientError> {
        self.delete(&detail_path(ORDERS_ENDPOINT, id)).await
    }

    /// Fetch customers and products concurrently. Fails if either fails.
    pub async fn load_order_form_data(&self) -> Result<OrderFormData, ApiClientError> {
        let no_filters = ProductFilters::default();
        let (customers, products) = tokio::try_join!(
            self.list_customers(None),
            self.list_products(None, &no_filters),
        )?;

        debug!(
            "Order form data loaded: {} customers, {} products",
            customers.results.len(),
            products.results.len()
        );

        Ok(OrderFormData {
            customers: customers.results,
            products: products.results,
        })
    }
}
