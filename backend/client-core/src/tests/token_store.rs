// Unit tests for the in-memory and file-backed token stores

use crate::token_store::{CredentialPair, FileTokenStore, MemoryTokenStore, TokenStore};
use common::RedactedToken;

use std::sync::Arc;

use tempfile::TempDir;

// ============================================
// MEMORY STORE
// ============================================

/// **VALUE**: Verifies a fresh store holds nothing and is unauthenticated.
#[test]
fn given_new_memory_store_when_queried_then_empty() {
    let store = MemoryTokenStore::new();

    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert!(!store.is_authenticated());
}

/// **VALUE**: Verifies `set` stores both tokens and `clear` removes both.
///
/// **WHY THIS MATTERS**: Login and logout are exactly these two operations.
///
/// **BUG THIS CATCHES**: Would catch `clear` leaving the refresh token behind,
/// which would let a logged-out client silently mint new access tokens.
#[test]
fn given_memory_store_when_set_then_clear_then_both_tokens_removed() {
    let store = MemoryTokenStore::new();

    store
        .set(CredentialPair::new("access-1", "refresh-1"))
        .expect("set");
    assert_eq!(store.access_token().expect("access").as_str(), "access-1");
    assert_eq!(store.refresh_token().expect("refresh").as_str(), "refresh-1");
    assert!(store.is_authenticated());

    store.clear().expect("clear");
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert!(!store.is_authenticated());
}

/// **VALUE**: Verifies a refresh replaces only the access token.
///
/// **BUG THIS CATCHES**: Would catch `set_access` dropping the refresh token,
/// making the second expiry unrecoverable.
#[test]
fn given_memory_store_when_set_access_then_refresh_token_kept() {
    let store = MemoryTokenStore::with_credentials(CredentialPair::new("old", "refresh-1"));

    store
        .set_access(RedactedToken::new("new"))
        .expect("set_access");

    assert_eq!(store.access_token().expect("access").as_str(), "new");
    assert_eq!(store.refresh_token().expect("refresh").as_str(), "refresh-1");
}

/// **VALUE**: Verifies clones of the `Arc` observe the same credentials.
#[test]
fn given_shared_store_when_one_handle_sets_then_other_sees_it() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let other = Arc::clone(&store);

    store.set(CredentialPair::new("a", "r")).expect("set");

    assert!(other.is_authenticated());
}

// ============================================
// FILE STORE
// ============================================

/// **VALUE**: Verifies a missing file opens as an empty store.
///
/// **WHY THIS MATTERS**: First run has no token file; that is "logged out", not an error.
#[test]
fn given_missing_file_when_open_then_empty_store() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::open(&path).expect("open");

    assert!(!store.is_authenticated());
    assert!(!path.exists());
}

/// **VALUE**: Verifies credentials survive reopening the store.
///
/// **WHY THIS MATTERS**: The CLI is a new process per command; a login that is
/// not persisted is useless.
///
/// **BUG THIS CATCHES**: Would catch write-through being skipped or the on-disk
/// keys drifting from what `open` reads.
#[test]
fn given_file_store_when_set_then_reopened_store_has_tokens() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested").join("tokens.json");

    let store = FileTokenStore::open(&path).expect("open");
    store.set(CredentialPair::new("access-1", "refresh-1")).expect("set");
    store
        .set_access(RedactedToken::new("access-2"))
        .expect("set_access");

    let reopened = FileTokenStore::open(&path).expect("reopen");
    assert_eq!(reopened.access_token().expect("access").as_str(), "access-2");
    assert_eq!(
        reopened.refresh_token().expect("refresh").as_str(),
        "refresh-1"
    );
    assert!(!path.with_extension("tmp").exists());
}

/// **VALUE**: Verifies the on-disk layout uses the fixed key names.
#[test]
fn given_file_store_when_set_then_file_uses_fixed_keys() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::open(&path).expect("open");
    store.set(CredentialPair::new("a", "r")).expect("set");

    let contents = std::fs::read_to_string(&path).expect("read");
    let value: serde_json::Value = serde_json::from_str(&contents).expect("json");
    assert_eq!(value["access_token"], "a");
    assert_eq!(value["refresh_token"], "r");
}

/// **VALUE**: Verifies clear removes the file and a second clear is harmless.
#[test]
fn given_file_store_when_cleared_twice_then_file_gone_and_no_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::open(&path).expect("open");
    store.set(CredentialPair::new("a", "r")).expect("set");

    store.clear().expect("first clear");
    store.clear().expect("second clear");

    assert!(!path.exists());
    assert!(!store.is_authenticated());
}

/// **VALUE**: Verifies a file that cannot be removed still ends the in-memory session.
///
/// **WHY THIS MATTERS**: Clearing after a failed refresh must destroy both tokens.
/// Keeping them in memory would make every later call repeat the failed refresh.
///
/// **BUG THIS CATCHES**: Would catch `clear` returning before the memory reset.
#[test]
fn given_unremovable_file_when_clear_then_error_and_memory_cleared() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::open(&path).expect("open");
    store.set(CredentialPair::new("a", "r")).expect("set");
    std::fs::remove_file(&path).expect("remove");
    std::fs::create_dir(&path).expect("dir in place of file");

    let result = store.clear();

    assert!(matches!(
        result,
        Err(crate::error::TokenStoreError::WriteError { .. })
    ));
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
}

/// **VALUE**: Verifies a corrupted file is reported rather than treated as logged out.
///
/// **BUG THIS CATCHES**: Would catch parse errors being swallowed, which would hide
/// a damaged credential file from the user.
#[test]
fn given_corrupted_file_when_open_then_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, "not json").expect("write");

    let result = FileTokenStore::open(&path);

    assert!(matches!(
        result,
        Err(crate::error::TokenStoreError::ParseError { .. })
    ));
}
