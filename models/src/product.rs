use crate::Amount;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    #[serde(other)]
    Unknown,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "IN_STOCK",
            StockStatus::LowStock => "LOW_STOCK",
            StockStatus::OutOfStock => "OUT_OF_STOCK",
            StockStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Product record as returned by `/api/v1/products/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub cost_price: Amount,
    pub selling_price: Amount,
    pub stock_qty: i64,
    #[serde(default)]
    pub stock_status: Option<StockStatus>,
}

/// Body for creating a product. The SKU is only settable on creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub cost_price: String,
    pub selling_price: String,
    pub stock_qty: i64,
}

/// Body for replacing an existing product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductUpdate {
    pub name: String,
    pub category: String,
    pub cost_price: String,
    pub selling_price: String,
    pub stock_qty: i64,
}

/// Query filters for the product list. Empty values are not sent.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub stock_status: Option<StockStatus>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl ProductFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let candidates = [
            ("search", self.search.clone()),
            ("category", self.category.clone()),
            (
                "stock_status",
                self.stock_status
                    .filter(|s| *s != StockStatus::Unknown)
                    .map(|s| s.as_str().to_string()),
            ),
            ("min_price", self.min_price.clone()),
            ("max_price", self.max_price.clone()),
        ];

        candidates
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
            .collect()
    }
}
