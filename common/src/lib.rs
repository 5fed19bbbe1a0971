//! Shared primitives for the inventory client workspace.
//!
//! Everything here is consumed by more than one crate:
//!
//! - **ErrorLocation**: file/line/column captured with `#[track_caller]`
//! - **HttpStatusCode**: status categorization without pulling in an HTTP stack
//! - **RedactedToken**: bearer credentials that never leak into logs
//!
//! The layering mirrors the rest of the workspace:
//!
//! - **common** (this crate): primitives
//! - **models**: pure data exchanged with the backend
//! - **client-core**: the API client operating on models
//! - **inventory**: the command-line shell wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
