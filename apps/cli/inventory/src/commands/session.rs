use super::to_output;
use crate::error::InventoryError;
use crate::state::AppState;

use log::info;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct SessionStatus<'a> {
    authenticated: bool,
    base_url: &'a str,
    token_file: String,
}

pub async fn login(state: &AppState, email: &str, password: &str) -> Result<Value, InventoryError> {
    state.client().login(email, password).await?;
    status(state)
}

/// Always leaves the token file empty, whatever the server says.
pub async fn logout(state: &AppState) -> Result<Value, InventoryError> {
    let outcome = state.client().logout().await?;
    if !outcome.server_acknowledged {
        info!("Server did not confirm logout; local credentials removed");
    }

    to_output(&serde_json::json!({
        "logged_out": true,
        "server_acknowledged": outcome.server_acknowledged,
        "login_path": outcome.login_path,
    }))
}

pub fn status(state: &AppState) -> Result<Value, InventoryError> {
    to_output(&SessionStatus {
        authenticated: state.client().is_authenticated(),
        base_url: state.client().base_url(),
        token_file: state.token_file().display().to_string(),
    })
}
