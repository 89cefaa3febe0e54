//! Configuration and data source resolution tests
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate VELVET_DATA_FILE or VELVET_CONFIG are marked with
//! #[serial] so they run sequentially.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;
use velvet_common::config::{
    load_toml_config, read_toml_config, resolve_data_source, DataSource, TomlConfig,
    CONFIG_FILE_ENV, DATA_FILE_ENV,
};
use velvet_common::{Error, VelvetData};

#[test]
#[serial]
fn test_no_overrides_uses_embedded() {
    env::remove_var(DATA_FILE_ENV);

    let source = resolve_data_source(None, &TomlConfig::default());
    assert_eq!(source, DataSource::Embedded);
}

#[test]
#[serial]
fn test_env_var_overrides_config_file() {
    env::set_var(DATA_FILE_ENV, "/tmp/velvet-env.toml");

    let config = TomlConfig {
        data_file: Some(PathBuf::from("/tmp/velvet-config.toml")),
        ..Default::default()
    };
    let source = resolve_data_source(None, &config);
    assert_eq!(source, DataSource::File(PathBuf::from("/tmp/velvet-env.toml")));

    // Cleanup
    env::remove_var(DATA_FILE_ENV);
}

#[test]
#[serial]
fn test_cli_overrides_env_var() {
    env::set_var(DATA_FILE_ENV, "/tmp/velvet-env.toml");

    let source = resolve_data_source(Some(Path::new("/tmp/velvet-cli.toml")), &TomlConfig::default());
    assert_eq!(source, DataSource::File(PathBuf::from("/tmp/velvet-cli.toml")));

    // Cleanup
    env::remove_var(DATA_FILE_ENV);
}

#[test]
#[serial]
fn test_config_file_used_when_no_env() {
    env::remove_var(DATA_FILE_ENV);

    let config = TomlConfig {
        data_file: Some(PathBuf::from("/tmp/velvet-config.toml")),
        ..Default::default()
    };
    assert_eq!(
        resolve_data_source(None, &config),
        DataSource::File(PathBuf::from("/tmp/velvet-config.toml"))
    );
}

#[test]
#[serial]
fn test_explicit_config_via_env() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        "[server]\nhost = \"0.0.0.0\"\nport = 6100\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    env::set_var(CONFIG_FILE_ENV, &path);
    let loaded = load_toml_config(None).unwrap();
    env::remove_var(CONFIG_FILE_ENV);

    assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
    assert!(loaded.skipped.is_none());
    let config = loaded.config;
    assert_eq!(config.server.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(config.server.port, Some(6100));
    assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial]
fn test_explicit_config_missing_is_error() {
    env::remove_var(CONFIG_FILE_ENV);
    let result = load_toml_config(Some(Path::new("/nonexistent/velvet/config.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_broken_platform_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("velvet");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[server\nport = 1\n").unwrap();

    env::remove_var(CONFIG_FILE_ENV);
    let previous = env::var_os("XDG_CONFIG_HOME");
    env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    let loaded = load_toml_config(None);
    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    let loaded = loaded.unwrap();
    assert!(loaded.path.is_none());
    assert!(loaded.config.server.port.is_none());
    let (path, err) = loaded.skipped.expect("broken config should be reported");
    assert_eq!(path, config_dir.join("config.toml"));
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_invalid_config_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();

    let result = read_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

// =============================================================================
// Data files on disk
// =============================================================================

#[test]
fn test_data_file_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.toml");
    fs::write(
        &path,
        r#"
arcana = ["Fool", "Magician", "Priestess"]
chart = [
    ["Fool", "Magician", "Priestess"],
    ["Fool", "Priestess", "Magician"],
    ["Magician", "Priestess", "Fool"],
]
"#,
    )
    .unwrap();

    let data = VelvetData::from_path(&path).unwrap();
    assert_eq!(data.chart.len(), 3);
    let fusion = data.chart.resolve_names("Priestess", "Magician").unwrap();
    assert_eq!(
        fusion.result().map(|a| data.chart.catalog().name(a)),
        Some("Fool")
    );
}

#[test]
fn test_data_file_with_gap_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.toml");
    fs::write(
        &path,
        r#"
arcana = ["Fool", "Magician", "Priestess"]
chart = [["Fool", "Magician", "Priestess"]]
"#,
    )
    .unwrap();

    let result = VelvetData::from_path(&path);
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn test_data_file_syntax_error_names_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "arcana = [\"Fool\"\n").unwrap();

    let err = VelvetData::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("broken.toml"), "{}", err);
}

#[test]
fn test_missing_data_file_is_io_error() {
    let result = VelvetData::from_path(Path::new("/nonexistent/velvet/data.toml"));
    assert!(matches!(result, Err(Error::Io(_))));
}
