//! Configuration management
//!
//! The client configuration is merged from two sources: command-line flags
//! and an optional JSON file at ~/.config/fds/client.config. Flags win over
//! file values, file values win over built-in defaults.

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Default region when neither the flags nor the config file name one
pub const DEFAULT_REGION: &str = "cnbj0";

/// Host suffix appended to the region to form the service endpoint
const ENDPOINT_SUFFIX: &str = "fds.api.xiaomi.com";

/// Contents of the local config file
///
/// Every key is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalConfig {
    /// Access key
    pub ak: Option<String>,

    /// Secret key
    pub sk: Option<String>,

    /// Service region
    pub region: Option<String>,

    /// Explicit endpoint host or URL
    pub end_point: Option<String>,

    /// Default bucket used when -b is not given
    pub bucket: Option<String>,
}

/// Values taken from command-line flags, before merging
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub enable_https: bool,
    pub enable_cdn: bool,
}

/// Fully resolved client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region: String,
    pub endpoint: Option<String>,
    pub enable_https: bool,
    pub enable_cdn: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            secret_key: None,
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            enable_https: true,
            enable_cdn: false,
        }
    }
}

impl ClientConfig {
    /// Merge flag values over file values over defaults
    pub fn resolve(local: &LocalConfig, overrides: &ConfigOverrides) -> Self {
        Self {
            access_key: overrides.access_key.clone().or_else(|| local.ak.clone()),
            secret_key: overrides.secret_key.clone().or_else(|| local.sk.clone()),
            region: overrides
                .region
                .clone()
                .or_else(|| local.region.clone())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint: overrides
                .endpoint
                .clone()
                .or_else(|| local.end_point.clone()),
            enable_https: overrides.enable_https,
            enable_cdn: overrides.enable_cdn,
        }
    }

    /// Resolve the service endpoint URL
    ///
    /// An explicit endpoint wins; a bare host is given a scheme from the
    /// https flag. Without one, the host is derived from the region, routed
    /// through the CDN host when CDN is enabled.
    pub fn endpoint_url(&self) -> Result<Url> {
        let scheme = if self.enable_https { "https" } else { "http" };

        let host = match &self.endpoint {
            Some(endpoint) if endpoint.contains("://") => {
                return Ok(Url::parse(endpoint)?);
            }
            Some(endpoint) => endpoint.clone(),
            None if self.enable_cdn => format!("cdn.{}.{ENDPOINT_SUFFIX}", self.region),
            None => format!("{}.{ENDPOINT_SUFFIX}", self.region),
        };

        Ok(Url::parse(&format!("{scheme}://{host}"))?)
    }
}

/// Loads the local config file from its per-user location
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager pointing at the default config path
    ///
    /// `FDS_CONFIG_DIR` overrides the directory, which keeps integration
    /// tests away from the real user configuration.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os("FDS_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("could not determine config directory".into()))?
                .join("fds"),
        };
        Ok(Self {
            config_path: config_dir.join("client.config"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the config file, treating a missing file as empty
    pub fn load(&self) -> Result<LocalConfig> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "local config not found");
            return Ok(LocalConfig::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: LocalConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("client.config");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert!(config.ak.is_none());
        assert!(config.bucket.is_none());
    }

    #[test]
    fn test_load_config_file() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            r#"{"ak":"AKID","sk":"SECRET","region":"cnbj1","end_point":"cnbj1.fds.api.xiaomi.com"}"#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.ak.as_deref(), Some("AKID"));
        assert_eq!(config.sk.as_deref(), Some("SECRET"));
        assert_eq!(config.region.as_deref(), Some("cnbj1"));
        assert_eq!(config.end_point.as_deref(), Some("cnbj1.fds.api.xiaomi.com"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "{not json").unwrap();
        assert!(manager.load().is_err());
    }

    #[test]
    fn test_resolve_flag_wins_over_file() {
        let local = LocalConfig {
            ak: Some("file-ak".into()),
            sk: Some("file-sk".into()),
            region: Some("cnbj1".into()),
            end_point: Some("file.example.com".into()),
            bucket: None,
        };
        let overrides = ConfigOverrides {
            access_key: Some("flag-ak".into()),
            region: Some("awsbj0".into()),
            enable_https: true,
            ..Default::default()
        };

        let config = ClientConfig::resolve(&local, &overrides);
        assert_eq!(config.access_key.as_deref(), Some("flag-ak"));
        assert_eq!(config.secret_key.as_deref(), Some("file-sk"));
        assert_eq!(config.region, "awsbj0");
        assert_eq!(config.endpoint.as_deref(), Some("file.example.com"));
    }

    #[test]
    fn test_resolve_defaults() {
        let config = ClientConfig::resolve(&LocalConfig::default(), &ConfigOverrides::default());
        assert!(config.access_key.is_none());
        assert_eq!(config.region, DEFAULT_REGION);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_endpoint_from_region() {
        let config = ClientConfig {
            enable_https: true,
            ..Default::default()
        };
        let url = config.endpoint_url().unwrap();
        assert_eq!(url.as_str(), "https://cnbj0.fds.api.xiaomi.com/");
    }

    #[test]
    fn test_endpoint_http_and_cdn() {
        let config = ClientConfig {
            region: "cnbj1".into(),
            enable_https: false,
            enable_cdn: true,
            ..Default::default()
        };
        let url = config.endpoint_url().unwrap();
        assert_eq!(url.as_str(), "http://cdn.cnbj1.fds.api.xiaomi.com/");
    }

    #[test]
    fn test_endpoint_explicit_host() {
        let config = ClientConfig {
            endpoint: Some("storage.internal:9000".into()),
            enable_https: false,
            ..Default::default()
        };
        let url = config.endpoint_url().unwrap();
        assert_eq!(url.as_str(), "http://storage.internal:9000/");
    }

    #[test]
    fn test_endpoint_explicit_url_keeps_scheme() {
        let config = ClientConfig {
            endpoint: Some("http://localhost:9000".into()),
            enable_https: true,
            ..Default::default()
        };
        let url = config.endpoint_url().unwrap();
        assert_eq!(url.scheme(), "http");
    }
}
