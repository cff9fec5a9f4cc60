//! Configuration file resolution tests
//!
//! Tests that touch VOICES_CONFIG are marked #[serial] so they never run
//! concurrently with each other.

use serial_test::serial;
use std::env;
use std::io::Write;
use voices_common::config::{StorageBackend, TomlConfig, CONFIG_ENV_VAR};

fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).expect("Should create config file");
    file.write_all(content.as_bytes()).expect("Should write config");
    path
}

#[test]
#[serial]
fn test_explicit_path_wins_over_env() {
    let dir = tempfile::tempdir().unwrap();
    let cli_path = write_config(&dir, "port = 9001\n");

    let other_dir = tempfile::tempdir().unwrap();
    let env_path = write_config(&other_dir, "port = 9002\n");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = TomlConfig::load(Some(&cli_path)).unwrap();
    assert_eq!(config.port, 9001);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_path_used_without_cli() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[storage]\nbackend = \"memory\"\n");
    env::set_var(CONFIG_ENV_VAR, &path);

    let config = TomlConfig::load(None).unwrap();
    assert_eq!(config.storage.backend, StorageBackend::Memory);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.toml");

    let config = TomlConfig::load(Some(&missing)).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
#[serial]
fn test_malformed_file_is_an_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "port = \"not a number\"\n");

    assert!(TomlConfig::load(Some(&path)).is_err());
}
