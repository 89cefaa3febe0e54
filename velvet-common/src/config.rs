//! Configuration loading and data source resolution

use std::path::{Path, PathBuf};

use serde::Deserialize;
use crate::{Error, Result};

/// Environment variable naming a reference data file
pub const DATA_FILE_ENV: &str = "VELVET_DATA_FILE";

/// Environment variable naming a config file
pub const CONFIG_FILE_ENV: &str = "VELVET_CONFIG";

/// Optional TOML config file contents
///
/// Every field is optional; a missing or empty file means "use defaults".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Reference data artifact to load instead of the embedded one
    pub data_file: Option<PathBuf>,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Either a bare level ("info", "debug") applied to the velvet crates,
    /// or a full tracing-subscriber directive ("velvet_fr=debug,tower_http=warn")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Where the reference data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Data artifact compiled into the binary
    Embedded,
    File(PathBuf),
}

/// Data source resolution, priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable `VELVET_DATA_FILE`
/// 3. `data_file` in the TOML config
/// 4. Embedded default (fallback)
pub fn resolve_data_source(cli_arg: Option<&Path>, config: &TomlConfig) -> DataSource {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return DataSource::File(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATA_FILE_ENV) {
        if !path.trim().is_empty() {
            return DataSource::File(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.data_file {
        return DataSource::File(path.clone());
    }

    // Priority 4: Embedded default
    DataSource::Embedded
}

/// Result of [`load_toml_config`]
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    /// File the config was read from; `None` when running on defaults
    pub path: Option<PathBuf>,
    /// Platform config file that exists but could not be used
    pub skipped: Option<(PathBuf, Error)>,
}

impl LoadedConfig {
    fn defaults() -> Self {
        Self {
            config: TomlConfig::default(),
            path: None,
            skipped: None,
        }
    }
}

/// Load the TOML config
///
/// An explicit path (CLI or `VELVET_CONFIG`) must exist and parse. Without
/// one, the platform locations are tried; a broken platform file is
/// reported in [`LoadedConfig::skipped`] and defaults are used. Nothing is
/// logged here, since this runs before the subscriber is installed.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from));

    if let Some(path) = explicit {
        let config = read_toml_config(&path)?;
        return Ok(LoadedConfig {
            config,
            path: Some(path),
            skipped: None,
        });
    }

    let Some(path) = default_config_path() else {
        return Ok(LoadedConfig::defaults());
    };

    Ok(match read_toml_config(&path) {
        Ok(config) => LoadedConfig {
            config,
            path: Some(path),
            skipped: None,
        },
        Err(e) => LoadedConfig {
            skipped: Some((path, e)),
            ..LoadedConfig::defaults()
        },
    })
}

/// Parse a config file from disk
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config {}: {}", path.display(), e)))
}

/// First existing platform config file
fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("velvet").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/velvet/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
