use super::{detail_path, list_path};
use crate::CUSTOMERS_ENDPOINT;
use crate::api_client::ApiClient;
use crate::error::ApiClientError;

use models::{Customer, CustomerPayload, Page};

impl ApiClient {
    pub async fn list_customers(
        &self,
        cursor: Option<&str>,
    ) -> Result<Page<Customer>, ApiClientError> {
        self.get(&list_path(CUSTOMERS_ENDPOINT, cursor, &[])).await
    }

    pub async fn get_customer(&self, id: u64) -> Result<Customer, ApiClientError> {
        self.get(&detail_path(CUSTOMERS_ENDPOINT, id)).await
    }

    pub async fn create_customer(
        &self,
        customer: &CustomerPayload,
    ) -> Result<Customer, ApiClientError> {
        self.post(CUSTOMERS_ENDPOINT, customer).await
    }

    pub async fn update_customer(
        &self,
        id: u64,
        customer: &CustomerPayload,
    ) -> Result<Customer, ApiClientError> {
        self.put(&detail_path(CUSTOMERS_ENDPOINT, id), customer).await
    }

    pub async fn delete_customer(&self, id: u64) -> Result<(), ApiClientError> {
        self.delete(&detail_path(CUSTOMERS_ENDPOINT, id)).await
    }
}
