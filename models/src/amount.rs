//! Monetary amounts as sent by the backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Decimal amount kept in its textual form.
///
/// The backend serializes decimals as strings (`"12.50"`), but some
/// endpoints emit bare JSON numbers. Both deserialize into the same value;
/// no float arithmetic is ever applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(pub String);

impl Amount {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(text) => Amount(text),
            RawAmount::Integer(value) => Amount(value.to_string()),
            RawAmount::Float(value) => Amount(value.to_string()),
        })
    }
}
