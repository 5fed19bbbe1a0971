use crate::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    /// Message suitable for showing next to the offending form.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation { message, .. } => message,
        }
    }
}
