use crate::error::InventoryError;

use client_core::{ApiClient, ClientConfig, FileTokenStore};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;

/// Everything a command needs: loaded config and a client backed by the
/// on-disk token store.
///
/// Each CLI invocation builds one of these; credentials persist between
/// invocations through the token file.
pub struct AppState {
    config: ClientConfig,
    client: ApiClient,
    token_file: PathBuf,
}

impl AppState {
    /// Load `client.toml` from `config_dir` (or the platform default), apply
    /// `INVENTORY_*` environment overrides, and open the token store.
    pub fn load(config_dir: Option<&Path>) -> Result<Self, InventoryError> {
        let config_dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => ClientConfig::default_dir()?,
        };

        let mut config = ClientConfig::load(&config_dir)?;
        config.apply_env_overrides()?;

        Self::from_config(config)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, InventoryError> {
        let token_file = config.token_file()?;
        let store = Arc::new(FileTokenStore::open(&token_file)?);
        let client = ApiClient::from_config(&config, store)?;

        info!(
            "Using backend {} (tokens at {})",
            client.base_url(),
            token_file.display()
        );

        Ok(Self {
            config,
            client,
            token_file,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn token_file(&self) -> &Path {
        &self.token_file
    }
}
