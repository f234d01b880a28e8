//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::{Validate, ValidationError};

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    #[validate(length(min = 1, message = "host cannot be empty"))]
    pub host: String,

    /// TCP port to bind
    #[validate(range(min = 1, message = "port must be between 1 and 65535"))]
    pub port: u16,

    /// Externally visible base URL used for `Location` headers and
    /// pagination links (e.g. `https://api.example.com`)
    #[validate(url(message = "public_base_url must be an absolute URL"))]
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Paging limits for collection endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_page_sizes"))]
pub struct PaginationConfig {
    /// Page size used when the client does not ask for one
    #[validate(range(min = 1, message = "default_page_size must be at least 1"))]
    pub default_page_size: usize,

    /// Largest page size a client may request
    #[validate(range(min = 1, message = "max_page_size must be at least 1"))]
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 20,
        }
    }
}

impl PaginationConfig {
    /// Clamp a requested page size into `1..=max_page_size`
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

fn validate_page_sizes(config: &PaginationConfig) -> Result<(), ValidationError> {
    if config.default_page_size > config.max_page_size {
        let mut err = ValidationError::new("page_size_order");
        err.message = Some("default_page_size must not exceed max_page_size".into());
        return Err(err);
    }
    Ok(())
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LibraryConfig {
    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub pagination: PaginationConfig,
}

impl LibraryConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load and validate configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Public base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.server.public_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LibraryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.pagination.max_page_size, 20);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = LibraryConfig::from_yaml_str("server:\n  port: 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.pagination.max_page_size, 20);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = LibraryConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = LibraryConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.server.public_base_url, config.server.public_base_url);
    }

    #[test]
    fn test_default_page_size_above_max_rejected() {
        let yaml = "pagination:\n  default_page_size: 50\n  max_page_size: 20\n";
        let err = LibraryConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let yaml = "server:\n  public_base_url: not a url\n";
        assert!(matches!(
            LibraryConfig::from_yaml_str(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        assert!(matches!(
            LibraryConfig::from_yaml_str("server: [unterminated"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_page_size_clamping() {
        let pagination = PaginationConfig::default();
        assert_eq!(pagination.page_size(None), 10);
        assert_eq!(pagination.page_size(Some(5)), 5);
        assert_eq!(pagination.page_size(Some(500)), 20);
        assert_eq!(pagination.page_size(Some(0)), 1);
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let mut config = LibraryConfig::default();
        config.server.public_base_url = "http://example.com/".to_string();
        assert_eq!(config.base_url(), "http://example.com");
    }
}
