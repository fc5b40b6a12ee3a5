//! Integration tests for configuration resolution and graceful degradation
//!
//! Covers:
//! - Missing config files do not terminate the tool
//! - Priority order: CLI > environment > platform file > compiled defaults
//! - Parse failures surface as configuration errors
//!
//! Tests that manipulate environment variables are marked `#[serial]` so they
//! never run in parallel.

use nyp_common::config::{
    load_toml_config, ConfigResolver, ConfigSource, TomlConfig, DEFAULT_OUTPUT_FILE,
};
use nyp_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TEST_ENV_VAR: &str = "NYP_TRANSFORM_CONFIG_TEST";

fn write_config(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_load_full_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "config.toml",
        r#"
        output = "edges.csv"
        download_copy = "copy.csv"
        observations = "raw.csv"
        canonical_pairs = true

        [logging]
        level = "warn"
        file = "/tmp/nyp.log"
        "#,
    );

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.output, PathBuf::from("edges.csv"));
    assert_eq!(config.download_copy, Some(PathBuf::from("copy.csv")));
    assert_eq!(config.observations, Some(PathBuf::from("raw.csv")));
    assert!(config.canonical_pairs);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/nyp.log")));
}

#[test]
fn test_malformed_config_is_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "bad.toml", "output = [unterminated");

    match load_toml_config(&path) {
        Err(Error::Config(msg)) => assert!(msg.contains("Failed to parse TOML")),
        other => panic!("expected Config error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_cli_path_has_highest_priority() {
    let dir = TempDir::new().unwrap();
    let cli = write_config(&dir, "cli.toml", r#"output = "from_cli.csv""#);
    let envp = write_config(&dir, "env.toml", r#"output = "from_env.csv""#);
    env::set_var(TEST_ENV_VAR, &envp);

    let resolver = ConfigResolver::with_env_var("nyp-transform-test", TEST_ENV_VAR);
    let resolved = resolver.resolve(Some(cli.as_path())).unwrap();

    env::remove_var(TEST_ENV_VAR);

    assert_eq!(resolved.config.output, PathBuf::from("from_cli.csv"));
    assert_eq!(resolved.source, ConfigSource::CommandLine(cli));
}

#[test]
fn test_missing_cli_path_is_error() {
    let resolver = ConfigResolver::with_env_var("nyp-transform-test", TEST_ENV_VAR);
    let result = resolver.resolve(Some(Path::new("/nonexistent/nyp/config.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_env_var_used_without_cli() {
    let dir = TempDir::new().unwrap();
    let envp = write_config(&dir, "env.toml", r#"output = "from_env.csv""#);
    env::set_var(TEST_ENV_VAR, &envp);

    let resolver = ConfigResolver::with_env_var("nyp-transform-test", TEST_ENV_VAR);
    let resolved = resolver.resolve(None).unwrap();

    env::remove_var(TEST_ENV_VAR);

    assert_eq!(resolved.config.output, PathBuf::from("from_env.csv"));
    assert_eq!(resolved.source, ConfigSource::Environment(envp));
}

#[test]
#[serial]
fn test_env_var_missing_file_degrades_to_defaults() {
    let missing = PathBuf::from("/nonexistent/nyp/env-config.toml");
    env::set_var(TEST_ENV_VAR, &missing);

    let resolver = ConfigResolver::with_env_var("nyp-transform-test", TEST_ENV_VAR);
    let resolved = resolver.resolve(None).unwrap();

    env::remove_var(TEST_ENV_VAR);

    assert_eq!(resolved.config, TomlConfig::default());
    assert_eq!(resolved.source, ConfigSource::MissingFile(missing));
}

#[test]
#[serial]
fn test_no_overrides_uses_compiled_defaults() {
    env::remove_var(TEST_ENV_VAR);

    // Application name chosen so no platform config file can exist for it
    let resolver = ConfigResolver::with_env_var("nyp-transform-test-no-such-app", TEST_ENV_VAR);
    let resolved = resolver.resolve(None).unwrap();

    assert_eq!(resolved.source, ConfigSource::CompiledDefaults);
    assert_eq!(resolved.config.output, PathBuf::from(DEFAULT_OUTPUT_FILE));
    assert!(!resolved.config.canonical_pairs);
}

#[test]
fn test_platform_path_layout() {
    let resolver = ConfigResolver::new("nyp-transform");
    if let Some(path) = resolver.platform_config_path() {
        assert!(path.ends_with("nyp-transform/config.toml"));
    }
}
