//! Configuration Loader Tests

use std::fs;
use tempfile::TempDir;
use xreg_domain::Error;
use xreg_infrastructure::config::loader::validate_app_config;
use xreg_infrastructure::config::{AppConfig, ConfigLoader, RegistryConfig};
use xreg_infrastructure::constants::DEFAULT_LOG_LEVEL;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("xreg.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();
    assert!(config.registry.features.is_empty());
    assert!(!config.registry.strict_versions);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert!(!config.logging.json_format);
    assert!(config.logging.file_output.is_none());
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[registry]
features = ["__CINT__", "ONLINE_ET"]
strict_versions = true

[logging]
level = "debug"
"#,
    );

    let config = ConfigLoader::new()
        .with_env_prefix("XREG_TEST_FILE")
        .with_config_path(&path)
        .load()
        .unwrap();

    assert_eq!(config.registry.features, vec!["__CINT__", "ONLINE_ET"]);
    assert!(config.registry.strict_versions);
    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.json_format);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[registry]\nstrict_versions = true\n");

    let config = ConfigLoader::new()
        .with_env_prefix("XREG_TEST_PARTIAL")
        .with_config_path(&path)
        .load()
        .unwrap();

    assert!(config.registry.strict_versions);
    assert!(config.registry.features.is_empty());
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_missing_explicit_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .load()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_invalid_log_level_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[logging]\nlevel = \"loud\"\n");

    let err = ConfigLoader::new()
        .with_env_prefix("XREG_TEST_LEVEL")
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_wrong_type_is_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[registry]\nstrict_versions = \"sometimes\"\n");

    let err = ConfigLoader::new()
        .with_env_prefix("XREG_TEST_TYPE")
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { source: Some(_), .. }));
}

#[test]
fn test_validate_rejects_blank_feature() {
    let mut config = AppConfig::default();
    config.registry.features = vec!["ONLINE ET".to_string()];
    assert!(validate_app_config(&config).is_err());

    config.registry.features = vec![String::new()];
    assert!(validate_app_config(&config).is_err());

    config.registry.features = vec!["ONLINE_ET".to_string()];
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("saved.toml");

    let mut original = AppConfig::default();
    original.registry.features = vec!["ONLINE_ET".to_string()];
    original.logging.json_format = true;

    let loader = ConfigLoader::new().with_env_prefix("XREG_TEST_SAVE");
    loader.save_to_file(&original, &path).unwrap();

    let loaded = loader.clone().with_config_path(&path).load().unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_registry_config_conversions() {
    let mut registry = RegistryConfig {
        features: vec!["__CINT__".to_string()],
        strict_versions: true,
    };
    registry.add_features(["ONLINE_ET", "__CINT__"]);

    assert_eq!(registry.features, vec!["__CINT__", "ONLINE_ET"]);
    assert!(registry.to_options().strict_versions);

    let features = registry.feature_set();
    assert_eq!(features.len(), 2);
    assert!(features.contains("ONLINE_ET"));
}
