//! Credential storage for the request client.
//!
//! The client never touches process-global state: a [`TokenStore`] is
//! injected as `Arc<dyn TokenStore>` and is the only owner of the live
//! credential pair.
//!
//! # Implementations
//! - [`MemoryTokenStore`]: process-local, lost on exit
//! - [`FileTokenStore`]: JSON file under fixed keys, survives restarts
//!
//! No expiry is tracked locally; an expired access token is discovered by a
//! 401 from the server.

pub mod file;

pub use file::FileTokenStore;

use crate::error::TokenStoreError;

use common::RedactedToken;

use std::sync::{PoisonError, RwLock};

/// Access + refresh token issued together at login.
#[derive(Debug, Clone)]
pub struct CredentialPair {
    pub access: RedactedToken,
    pub refresh: RedactedToken,
}

impl CredentialPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: RedactedToken::new(access),
            refresh: RedactedToken::new(refresh),
        }
    }
}

/// Storage contract consumed by [`crate::ApiClient`].
pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<RedactedToken>;

    fn refresh_token(&self) -> Option<RedactedToken>;

    /// Replace both tokens (login).
    fn set(&self, credentials: CredentialPair) -> Result<(), TokenStoreError>;

    /// Replace only the access token (refresh). The refresh token is kept.
    fn set_access(&self, access: RedactedToken) -> Result<(), TokenStoreError>;

    /// Drop both tokens (logout, failed refresh).
    fn clear(&self) -> Result<(), TokenStoreError>;

    /// True iff an access token is present.
    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

/// Tokens currently held by a store. Either side may be absent.
#[derive(Debug, Clone, Default)]
pub(crate) struct TokenState {
    pub access: Option<RedactedToken>,
    pub refresh: Option<RedactedToken>,
}

impl TokenState {
    pub fn from_pair(credentials: CredentialPair) -> Self {
        Self {
            access: Some(credentials.access),
            refresh: Some(credentials.refresh),
        }
    }
}

/// In-memory store. Cloning the `Arc` around it shares the credentials.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    state: RwLock<TokenState>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential pair.
    pub fn with_credentials(credentials: CredentialPair) -> Self {
        Self {
            state: RwLock::new(TokenState::from_pair(credentials)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
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
        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            TokenState::from_pair(credentials);
        Ok(())
    }

    fn set_access(&self, access: RedactedToken) -> Result<(), TokenStoreError> {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .access = Some(access);
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = TokenState::default();
        Ok(())
    }
}
