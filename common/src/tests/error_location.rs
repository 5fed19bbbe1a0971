use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures the file and a non-zero position.
///
/// **WHY THIS MATTERS**: Every error enum in the workspace carries an ErrorLocation.
/// If capture breaks, error output loses the one thing that makes it debuggable.
///
/// **BUG THIS CATCHES**: Would catch if `Location::caller()` stops being propagated
/// or the fields are swapped/zeroed.
#[test]
#[track_caller]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN/WHEN: Creating ErrorLocation from the caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: File, line and column are populated
    assert!(location.file.contains("error_location.rs"));
    assert!(location.line > 0);
    assert!(location.column > 0);
}

/// **VALUE**: Verifies the bracketed `[file:line:column]` Display format.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops brackets or a component.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation {
        file: "src/api_client/mod.rs",
        line: 42,
        column: 7,
    };

    assert_eq!(location.to_string(), "[src/api_client/mod.rs:42:7]");
}
