//! Configuration resolution for tunemood-api
//!
//! Each setting is resolved CLI/ENV → TOML → compiled default. clap already
//! folds environment variables into the CLI values, so this module only
//! merges the three tiers and validates the result.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::info;
use tunemood_common::config::{CompiledDefaults, TomlConfig};
use tunemood_common::{Error, Result};

/// Bytes per MiB
const MIB: u64 = 1024 * 1024;

/// Settings that govern upload staging
#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Directory for request-scoped staging and copy files
    pub temp_dir: PathBuf,
    /// Hard cap on multipart body bytes
    pub max_upload_bytes: u64,
}

impl UploadSettings {
    /// Request body limit handed to axum
    ///
    /// Leaves headroom for multipart boundaries and part headers so that an
    /// upload at exactly the cap is still parsed, while anything far larger is
    /// cut off by the transport.
    pub fn body_limit(&self) -> usize {
        usize::try_from(self.max_upload_bytes.saturating_add(MIB)).unwrap_or(usize::MAX)
    }
}

/// Values supplied on the command line (or via their env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub temp_dir: Option<PathBuf>,
    pub max_upload_mb: Option<u64>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub upload: UploadSettings,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge CLI/ENV overrides over TOML over compiled defaults
    pub fn resolve(overrides: ConfigOverrides, toml: TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::for_current_platform();

        let host_str = overrides.host.or(toml.host).unwrap_or(defaults.host);
        let host: IpAddr = host_str
            .parse()
            .map_err(|e| Error::Config(format!("Invalid host '{}': {}", host_str, e)))?;

        let port = overrides.port.or(toml.port).unwrap_or(defaults.port);

        let temp_dir = overrides
            .temp_dir
            .or(toml.temp_dir)
            .unwrap_or(defaults.temp_dir);

        let max_upload_mb = overrides
            .max_upload_mb
            .or(toml.max_upload_mb)
            .unwrap_or(defaults.max_upload_mb);
        if max_upload_mb == 0 {
            return Err(Error::Config("max_upload_mb must be greater than 0".to_string()));
        }
        let max_upload_bytes = max_upload_mb
            .checked_mul(MIB)
            .ok_or_else(|| Error::Config(format!("max_upload_mb too large: {}", max_upload_mb)))?;

        let log_level = overrides.log_level.unwrap_or(toml.logging.level);

        Ok(Self {
            host,
            port,
            upload: UploadSettings {
                temp_dir,
                max_upload_bytes,
            },
            log_level,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Create the temp directory if it does not exist yet
    pub fn ensure_temp_dir(&self) -> Result<()> {
        let dir = &self.upload.temp_dir;
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            info!("Created temp directory: {}", dir.display());
        } else if !dir.is_dir() {
            return Err(Error::Config(format!(
                "Temp path is not a directory: {}",
                dir.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunemood_common::config::LoggingConfig;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = ServiceConfig::resolve(ConfigOverrides::default(), TomlConfig::default()).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.upload.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.upload.temp_dir, std::env::temp_dir());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let toml = TomlConfig {
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
            temp_dir: Some(PathBuf::from("/srv/tunemood/tmp")),
            max_upload_mb: Some(10),
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        };

        let config = ServiceConfig::resolve(ConfigOverrides::default(), toml).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.upload.temp_dir, PathBuf::from("/srv/tunemood/tmp"));
        assert_eq!(config.upload.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_cli_overrides_toml() {
        let toml = TomlConfig {
            port: Some(8080),
            max_upload_mb: Some(10),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            port: Some(9090),
            max_upload_mb: Some(5),
            log_level: Some("trace".to_string()),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(overrides, toml).unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.upload.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_zero_upload_cap_rejected() {
        let overrides = ConfigOverrides {
            max_upload_mb: Some(0),
            ..Default::default()
        };

        let result = ServiceConfig::resolve(overrides, TomlConfig::default());

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_host_rejected() {
        let overrides = ConfigOverrides {
            host: Some("not-an-ip".to_string()),
            ..Default::default()
        };

        assert!(ServiceConfig::resolve(overrides, TomlConfig::default()).is_err());
    }

    #[test]
    fn test_body_limit_has_headroom() {
        let settings = UploadSettings {
            temp_dir: std::env::temp_dir(),
            max_upload_bytes: 1000,
        };
        assert_eq!(settings.body_limit(), 1000 + 1024 * 1024);
    }

    #[test]
    fn test_ensure_temp_dir_creates_missing() {
        let parent = tempfile::TempDir::new().unwrap();
        let mut config = ServiceConfig::resolve(ConfigOverrides::default(), TomlConfig::default()).unwrap();
        config.upload.temp_dir = parent.path().join("nested").join("tmp");

        config.ensure_temp_dir().unwrap();

        assert!(config.upload.temp_dir.is_dir());
    }
}
