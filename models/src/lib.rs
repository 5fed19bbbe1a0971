//! Domain models for the inventory backend.
//!
//! This crate contains pure data structures exchanged with the REST API.
//! Models have no transport logic - they're just data that can be passed
//! between layers.
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **client-core**: Request client operating on models
//! - **inventory**: Command-line shell wiring everything together

pub mod amount;
pub mod auth;
pub mod customer;
pub mod error;
pub mod order;
pub mod page;
pub mod product;

#[cfg(test)]
mod tests;

pub use amount::Amount;
pub use auth::{LoginRequest, LogoutRequest, RefreshRequest, RefreshResponse, TokenPairResponse};
pub use customer::{Customer, CustomerPayload};
pub use error::model_error::ModelError;
pub use order::{
    CustomerRef, NewOrder, NewOrderBuilder, NewOrderItem, Order, OrderFilters, OrderItem,
    OrderStatus, OrderStatusUpdate,
};
pub use page::{Page, extract_cursor};
pub use product::{NewProduct, Product, ProductFilters, ProductUpdate, StockStatus};

pub use common::ErrorLocation;
