use crate::error::model_error::ModelError;
use crate::{Amount, ErrorLocation};

use std::panic::Location;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
    /// A status this client does not know yet. Never sent as a filter.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }
}

/// How an order references its customer: by id or by display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Id(u64),
    Name(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<u64>,
    pub product_sku: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: Amount,
    pub total_price: Amount,
}

/// Order record as returned by `/api/v1/orders/`.
///
/// List responses omit `items`; detail responses include them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub order_number: String,
    pub customer: CustomerRef,
    pub order_date: String,
    pub status: OrderStatus,
    pub total_amount: Amount,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrderItem {
    pub product_id: u64,
    pub quantity: u32,
    pub price: String,
}

/// Body of `POST /api/v1/orders/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub customer_id: u64,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    pub fn builder(customer_id: u64) -> NewOrderBuilder {
        NewOrderBuilder {
            customer_id,
            items: Vec::new(),
        }
    }

    /// An order must carry at least one item.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.customer_id == 0 {
            return Err(ModelError::Validation {
                message: String::from("Please select a customer"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.items.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Please add at least one item"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

/// Builder for [`NewOrder`].
///
/// Rows without a product or with a zero quantity are dropped, the way an
/// order form ignores half-filled rows.
#[derive(Debug)]
pub struct NewOrderBuilder {
    customer_id: u64,
    items: Vec<NewOrderItem>,
}

impl NewOrderBuilder {
    pub fn with_item(mut self, product_id: u64, quantity: u32, price: impl Into<String>) -> Self {
        if product_id != 0 && quantity != 0 {
            self.items.push(NewOrderItem {
                product_id,
                quantity,
                price: price.into(),
            });
        }
        self
    }

    #[track_caller]
    pub fn build(self) -> Result<NewOrder, ModelError> {
        let order = NewOrder {
            customer_id: self.customer_id,
            items: self.items,
        };
        order.validate()?;
        Ok(order)
    }
}

/// Body of `PUT /api/v1/orders/{id}/` when only the status changes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Query filters for the order list. Empty values are not sent.
#[derive(Debug, Clone, Default)]
pub struct OrderFilters {
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub customer_id: Option<u64>,
    pub order_date_from: Option<String>,
    pub order_date_to: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
}

impl OrderFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let candidates = [
            ("search", self.search.clone()),
            (
                "status",
                self.status
                    .filter(|s| *s != OrderStatus::Unknown)
                    .map(|s| s.as_str().to_string()),
            ),
            ("customer_id", self.customer_id.map(|id| id.to_string())),
            ("order_date_from", self.order_date_from.clone()),
            ("order_date_to", self.order_date_to.clone()),
            ("min_amount", self.min_amount.clone()),
            ("max_amount", self.max_amount.clone()),
        ];

        candidates
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
            .collect()
    }
}
