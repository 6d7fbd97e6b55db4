//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/wwcp/config.toml`). Every
//! field has a default so a partial or missing file still yields a usable
//! configuration.
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [authorization]
//! authorizator_id = "DE*GEF"
//! cache_ttl_secs = 300
//!
//! [[authorization.tokens]]
//! token = "AABBCCDD"
//! status = "Accepted"
//! provider_id = "DE-GDF"
//!
//! [navigation_provider]
//! id = "NP-LOCAL"
//! name = "Local navigation provider"
//! request_timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::authorization::TokenEntry;
use crate::shared::errors::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub authorization: AuthorizationConfig,
    pub navigation_provider: NavigationProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizationConfig {
    pub authorizator_id: String,
    /// Lifetime of cacheable authorization results
    pub cache_ttl_secs: u64,
    pub tokens: Vec<TokenEntry>,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            authorizator_id: "LOCAL".to_string(),
            cache_ttl_secs: 300,
            tokens: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationProviderConfig {
    pub id: String,
    pub name: String,
    pub disable_push_data: bool,
    pub disable_push_status: bool,
    pub request_timeout_secs: Option<u64>,
}

impl Default for NavigationProviderConfig {
    fn default() -> Self {
        Self {
            id: "NP-LOCAL".to_string(),
            name: "Local navigation provider".to_string(),
            disable_push_data: false,
            disable_push_status: false,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// `~/.config/wwcp/config.toml`, or `./wwcp.toml` when there is no config dir.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("wwcp").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("wwcp.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::authorization::TokenStatus;

    const SAMPLE: &str = r#"
[logging]
level = "debug"
format = "json"

[authorization]
authorizator_id = "DE*GEF"
cache_ttl_secs = 60

[[authorization.tokens]]
token = "AABBCCDD"
provider_id = "DE-GDF"

[[authorization.tokens]]
token = "11223344"
status = "Blocked"
expiry_date = "2030-01-01T00:00:00Z"

[navigation_provider]
id = "NP-1"
name = "Test"
disable_push_status = true
request_timeout_secs = 30
"#;

    #[test]
    fn parses_full_config() {
        let config = AppConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.authorization.authorizator_id, "DE*GEF");
        assert_eq!(config.authorization.cache_ttl_secs, 60);
        assert_eq!(config.authorization.tokens.len(), 2);
        assert_eq!(config.authorization.tokens[0].status, TokenStatus::Accepted);
        assert_eq!(config.authorization.tokens[1].status, TokenStatus::Blocked);
        assert!(config.authorization.tokens[1].expiry_date.is_some());
        assert_eq!(config.navigation_provider.id, "NP-1");
        assert!(config.navigation_provider.disable_push_status);
        assert!(!config.navigation_provider.disable_push_data);
        assert_eq!(config.navigation_provider.request_timeout_secs, Some(30));
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config = AppConfig::from_toml("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.authorization.cache_ttl_secs, 300);
        assert_eq!(config.navigation_provider.id, "NP-LOCAL");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[logging\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load("/nonexistent/wwcp/config.toml").unwrap();
        assert_eq!(config.authorization.authorizator_id, "LOCAL");
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("wwcp-config-{}", uuid::Uuid::new_v4()))
            .join("config.toml");
        let config = AppConfig::from_toml(SAMPLE).unwrap();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.authorization.tokens, config.authorization.tokens);
        assert_eq!(loaded.navigation_provider.name, "Test");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn default_path_ends_with_wwcp_config() {
        assert!(default_config_path().ends_with("config.toml"));
    }
}
