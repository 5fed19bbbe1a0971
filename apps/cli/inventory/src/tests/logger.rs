// Unit tests for logger module initialization logic
// Tests focus on thread-safety and error handling

use crate::error::InventoryError;
use crate::logger::{LOG_FILE_NAME, build_dispatch, initialize};

use std::path::PathBuf;

use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Tests and the binary may both install the logger; fern
/// refuses a second global logger.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing the second call to fail when setting the global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = TempDir::new().expect("tempdir");

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path(), false);
    let result2 = initialize(temp_dir.path(), true);

    // THEN: Both should return Ok (second one logs warning but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: Verifies that an unusable log directory is an error, not a panic.
///
/// **WHY THIS MATTERS**: A read-only home directory must produce a clear message
/// instead of crashing the CLI.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` is unwrapped.
#[test]
fn given_invalid_log_dir_when_dispatch_built_then_returns_error() {
    // GIVEN: A path that cannot hold a file on Unix-like systems
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Building the dispatch
    let result = build_dispatch(&invalid_dir, false);

    // THEN: Should return the app-level error variant
    assert!(matches!(result, Err(InventoryError::Inventory { .. })));
}

/// **VALUE**: Verifies the log file is created in the requested directory.
#[test]
fn given_valid_log_dir_when_dispatch_built_then_log_file_created() {
    let temp_dir = TempDir::new().expect("tempdir");

    let result = build_dispatch(temp_dir.path(), true);

    assert!(result.is_ok());
    assert!(temp_dir.path().join(LOG_FILE_NAME).exists());
}
