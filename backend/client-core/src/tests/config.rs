// Unit tests for ClientConfig load/save/validate and environment overrides

use crate::config::{BASE_URL_ENV, ClientConfig, TOKEN_FILE_ENV};
use crate::error::ConfigError;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

/// **VALUE**: Verifies defaults point at the local backend with no timeout.
///
/// **WHY THIS MATTERS**: The request client must not impose a timeout unless
/// one is configured.
#[test]
fn given_default_config_when_inspected_then_local_backend_and_no_timeout() {
    let config = ClientConfig::default();

    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert_eq!(config.api.login_path, "login.html");
    assert!(config.timeout().is_none());
    assert!(config.validate().is_ok());
}

/// **VALUE**: Verifies a missing file loads defaults.
#[test]
fn given_missing_file_when_load_then_defaults() {
    let dir = TempDir::new().expect("tempdir");

    let config = ClientConfig::load(dir.path()).expect("load");

    assert_eq!(config, ClientConfig::default());
}

/// **VALUE**: Verifies save then load returns the same configuration.
///
/// **BUG THIS CATCHES**: Would catch a field missing `#[serde(default)]` or a
/// temp file left behind by the atomic write.
#[test]
fn given_saved_config_when_loaded_then_values_preserved() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = ClientConfig::default();
    config.api.base_url = "https://inventory.example.com".to_string();
    config.api.timeout_secs = Some(30);
    config.storage.token_file = Some(PathBuf::from("/tmp/tokens.json"));

    config.save(dir.path()).expect("save");
    let loaded = ClientConfig::load(dir.path()).expect("load");

    assert_eq!(loaded, config);
    assert_eq!(loaded.timeout(), Some(Duration::from_secs(30)));
    assert!(!dir.path().join("client.toml.tmp").exists());
}

/// **VALUE**: Verifies a partial file fills the rest from defaults.
#[test]
fn given_partial_file_when_load_then_missing_sections_defaulted() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("client.toml"),
        "[api]\nbase_url = \"http://10.0.0.5:8000\"\n",
    )
    .expect("write");

    let config = ClientConfig::load(dir.path()).expect("load");

    assert_eq!(config.api.base_url, "http://10.0.0.5:8000");
    assert_eq!(config.api.login_path, "login.html");
    assert_eq!(config.version, 1);
    assert!(config.storage.token_file.is_none());
}

/// **VALUE**: Verifies malformed TOML is an error, not silently defaulted.
#[test]
fn given_malformed_file_when_load_then_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("client.toml"), "[api\nbase_url =").expect("write");

    let result = ClientConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// **VALUE**: Verifies invalid values are rejected.
///
/// **BUG THIS CATCHES**: Would catch a zero timeout (every request fails instantly)
/// or a non-HTTP base URL slipping through.
#[test]
fn given_invalid_values_when_validate_then_validation_error() {
    let mut bad_scheme = ClientConfig::default();
    bad_scheme.api.base_url = "ftp://inventory".to_string();

    let mut zero_timeout = ClientConfig::default();
    zero_timeout.api.timeout_secs = Some(0);

    let mut bad_version = ClientConfig::default();
    bad_version.version = 0;

    let mut empty_login = ClientConfig::default();
    empty_login.api.login_path = String::new();

    for config in [bad_scheme, zero_timeout, bad_version, empty_login] {
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}

/// **VALUE**: Verifies overrides replace configured values and empty ones are ignored.
#[test]
fn given_override_lookup_when_applied_then_values_replaced() {
    let vars: HashMap<&str, &str> = HashMap::from([
        (BASE_URL_ENV, "https://staging.example.com"),
        (TOKEN_FILE_ENV, ""),
    ]);
    let mut config = ClientConfig::default();

    config
        .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
        .expect("overrides");

    assert_eq!(config.api.base_url, "https://staging.example.com");
    assert!(config.storage.token_file.is_none());
}

/// **VALUE**: Verifies an invalid override fails validation.
#[test]
fn given_invalid_override_when_applied_then_validation_error() {
    let mut config = ClientConfig::default();

    let result = config.apply_overrides(|key| {
        (key == BASE_URL_ENV).then(|| "not a url".to_string())
    });

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

/// **VALUE**: Verifies the process environment is consulted.
///
/// **WHY THIS MATTERS**: Deployments point the CLI at a backend without editing files.
#[test]
#[serial]
fn given_env_var_when_apply_env_overrides_then_token_file_overridden() {
    // SAFETY: serialized with other environment-mutating tests.
    unsafe { std::env::set_var(TOKEN_FILE_ENV, "/var/lib/inventory/tokens.json") };
    let mut config = ClientConfig::default();

    let result = config.apply_env_overrides();
    unsafe { std::env::remove_var(TOKEN_FILE_ENV) };

    result.expect("overrides");
    assert_eq!(
        config.token_file().expect("token file"),
        PathBuf::from("/var/lib/inventory/tokens.json")
    );
}
