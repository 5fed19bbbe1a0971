use super::{CredentialPair, TokenState, TokenStore};
use crate::error::TokenStoreError;

use common::{ErrorLocation, RedactedToken};

use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// On-disk layout: two fixed keys, either may be null.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Durable store backed by a JSON file.
///
/// Reads are served from an in-memory copy loaded at [`FileTokenStore::open`];
/// every mutation is written through with temp file + rename so a crash never
/// leaves a half-written credential file.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    state: RwLock<TokenState>,
}

impl FileTokenStore {
    /// Open the store at `path`. A missing file means "no credentials".
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TokenStoreError> {
        let path = path.into();
        let state = Self::read_state(&path)?;

        debug!(
            "Token store opened at {} (authenticated: {})",
            path.display(),
            state.access.is_some()
        );

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(path: &Path) -> Result<TokenState, TokenStoreError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TokenState::default()),
            Err(e) => {
                return Err(TokenStoreError::ReadError {
                    location: ErrorLocation::from(Location::caller()),
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let stored: StoredTokens =
            serde_json::from_str(&contents).map_err(|e| TokenStoreError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(TokenState {
            access: stored.access_token.map(RedactedToken::new),
            refresh: stored.refresh_token.map(RedactedToken::new),
        })
    }

    fn write_state(&self, state: &TokenState) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TokenStoreError::WriteError {
                location: ErrorLocation::from(Location::caller()),
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let stored = StoredTokens {
            access_token: state.access.as_ref().map(|t| t.as_str().to_string()),
            refresh_token: state.refresh.as_ref().map(|t| t.as_str().to_string()),
        };

        let json =
            serde_json::to_string_pretty(&stored).map_err(|e| TokenStoreError::SerializeError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        let temp_path = self.path.with_extension("tmp");

        std::fs::write(&temp_path, json).map_err(|e| TokenStoreError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| TokenStoreError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<RedactedToken> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access
            .clone()
    }

    fn refresh_token(&self) -> Option<RedactedToken> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh
            .clone()
    }

    fn set(&self, credentials: CredentialPair) -> Result<(), TokenStoreError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let next = TokenState::from_pair(credentials);
        self.write_state(&next)?;
        *state = next;
        Ok(())
    }

    fn set_access(&self, access: RedactedToken) -> Result<(), TokenStoreError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let next = TokenState {
            access: Some(access),
            refresh: state.refresh.clone(),
        };
        self.write_state(&next)?;
        *state = next;
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        // Memory is reset first so a stuck file never keeps a live session.
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = TokenState::default();

        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(TokenStoreError::WriteError {
                    location: ErrorLocation::from(Location::caller()),
                    path: self.path.clone(),
                    source: e,
                });
            }
        }

        info!("Credentials cleared from {}", self.path.display());
        Ok(())
    }
}
