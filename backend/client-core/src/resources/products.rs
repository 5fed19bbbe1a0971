use super::{detail_path, list_path};
use crate::PRODUCTS_ENDPOINT;
use crate::api_client::ApiClient;
use crate::error::ApiClientError;

use models::{NewProduct, Page, Product, ProductFilters, ProductUpdate};

impl ApiClient {
    pub async fn list_products(
        &self,
        cursor: Option<&str>,
        filters: &ProductFilters,
    ) -> Result<Page<Product>, ApiClientError> {
        let path = list_path(PRODUCTS_ENDPOINT, cursor, &filters.query_pairs());
        self.get(&path).await
    }

    pub async fn get_product(&self, id: u64) -> Result<Product, ApiClientError> {
        self.get(&detail_path(PRODUCTS_ENDPOINT, id)).await
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiClientError> {
        self.post(PRODUCTS_ENDPOINT, product).await
    }

    /// The SKU is fixed at creation and not part of the update body.
    pub async fn update_product(
        &self,
        id: u64,
        product: &ProductUpdate,
    ) -> Result<Product, ApiClientError> {
        self.put(&detail_path(PRODUCTS_ENDPOINT, id), product).await
    }

    pub async fn delete_product(&self, id: u64) -> Result<(), ApiClientError> {
        self.delete(&detail_path(PRODUCTS_ENDPOINT, id)).await
    }
}
