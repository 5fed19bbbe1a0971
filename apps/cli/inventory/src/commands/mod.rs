pub mod resources;
pub mod session;

use crate::cli::Command;
use crate::error::InventoryError;
use crate::state::AppState;

use serde::Serialize;
use serde_json::Value;

/// Run one CLI command and return its output document.
pub async fn execute(state: &AppState, command: Command) -> Result<Value, InventoryError> {
    match command {
        Command::Login { email, password } => session::login(state, &email, &password).await,
        Command::Logout => session::logout(state).await,
        Command::Status => session::status(state),
        Command::Customers { command } => resources::customers(state, command).await,
        Command::Products { command } => resources::products(state, command).await,
        Command::Orders { command } => resources::orders(state, command).await,
    }
}

#[track_caller]
pub(crate) fn to_output<T: Serialize>(value: &T) -> Result<Value, InventoryError> {
    serde_json::to_value(value)
        .map_err(|e| InventoryError::inventory(format!("Failed to render output: {e}")))
}
