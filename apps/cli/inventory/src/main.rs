use inventory::cli::Cli;
use inventory::commands;
use inventory::error::InventoryError;
use inventory::logger::initialize as LoggerInitialize;
use inventory::state::AppState;

use std::fs::create_dir_all;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use serde_json::Value;

const APP_DIR_NAME: &str = "inventory";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render output: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("{e}");
            eprintln!("{}", e.user_message());
            if let InventoryError::LoginRequired { login_path, .. } = &e {
                info!("Login required; shell redirect target is {login_path}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<Value, InventoryError> {
    let log_dir = match cli.log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };

    create_dir_all(&log_dir).map_err(|e| {
        InventoryError::inventory(format!(
            "Failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir, cli.verbose)?;
    info!("Log directory: {}", log_dir.display());

    let state = AppState::load(cli.config_dir.as_deref())?;
    commands::execute(&state, cli.command).await
}

fn default_log_dir() -> Result<PathBuf, InventoryError> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join("logs"))
        .ok_or_else(|| InventoryError::inventory("Failed to get log directory"))
}
