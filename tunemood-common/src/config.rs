//! Bootstrap configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments / environment variables (handled by each binary)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! A missing config file at the default location is not an error: the
//! service starts with compiled defaults. A file named explicitly by the
//! operator must exist and parse.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default listen address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Default upload size cap in MiB
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 50;

/// Default tracing level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; unset fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Listen address (e.g. "0.0.0.0")
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Directory where request-scoped upload files are staged
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Maximum upload size in MiB
    #[serde(default)]
    pub max_upload_mb: Option<u64>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Built-in fallback values used when neither CLI/ENV nor TOML provide a setting
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub host: String,
    pub port: u16,
    pub temp_dir: PathBuf,
    pub max_upload_mb: u64,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            temp_dir: std::env::temp_dir(),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Platform config file location: `<config_dir>/tunemood/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tunemood").join("config.toml"))
}

/// Where the TOML tier came from
///
/// Loading runs before the tracing subscriber exists, so the loader reports
/// its source instead of logging it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No file at the default location
    Missing(PathBuf),
    /// Platform has no config directory
    NoConfigDir,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "config file {}", path.display()),
            ConfigSource::Missing(path) => {
                write!(f, "compiled defaults (no config file at {})", path.display())
            }
            ConfigSource::NoConfigDir => {
                write!(f, "compiled defaults (no platform config directory)")
            }
        }
    }
}

/// Load the TOML config file
///
/// With `explicit` set, the file must exist and parse. Otherwise the default
/// location is tried and a missing file yields `TomlConfig::default()`.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    if let Some(path) = explicit {
        let config = read_toml_config(path)?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    let Some(path) = default_config_path() else {
        return Ok((TomlConfig::default(), ConfigSource::NoConfigDir));
    };

    if !path.exists() {
        return Ok((TomlConfig::default(), ConfigSource::Missing(path)));
    }

    let config = read_toml_config(&path)?;
    Ok((config, ConfigSource::File(path)))
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}
