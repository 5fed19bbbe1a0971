use crate::Amount;

use serde::{Deserialize, Serialize};

/// Customer record as returned by `/api/v1/customers/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    #[serde(default)]
    pub customer_code: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub opening_balance: Option<Amount>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body for creating or replacing a customer.
///
/// Optional fields serialize as `null` so a PUT clears them server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerPayload {
    pub email: String,
    pub customer_code: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub opening_balance: Option<String>,
}
