//! Configuration schema types
//!
//! This module defines the configuration structure of the `ptrack.toml` file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Runtime environment
///
/// Only `development` changes behaviour: together with a loopback portal
/// origin it makes the client talk to the gateway directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!(
                "Invalid environment '{other}'. Must be one of: development, staging, production"
            )),
        }
    }
}

/// Main Patient Track configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Persisted session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Default login credentials
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PortalConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin the portal is served from; its host drives base URL selection
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Gateway used directly in local development
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Same-origin path prefix proxied to the gateway
    #[serde(default = "default_proxy_prefix")]
    pub proxy_prefix: String,

    /// Request timeout; unset means the transport's own limits apply
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            gateway_url: default_gateway_url(),
            proxy_prefix: default_proxy_prefix(),
            timeout_seconds: None,
        }
    }
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        let origin = Url::parse(&self.origin)
            .map_err(|e| format!("Invalid api.origin '{}': {e}", self.origin))?;
        if origin.host_str().is_none() {
            return Err(format!("api.origin '{}' has no host", self.origin));
        }

        Url::parse(&self.gateway_url)
            .map_err(|e| format!("Invalid api.gateway_url '{}': {e}", self.gateway_url))?;

        if !self.proxy_prefix.starts_with('/') {
            return Err(format!(
                "api.proxy_prefix must start with '/', got '{}'",
                self.proxy_prefix
            ));
        }

        if self.timeout_seconds == Some(0) {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// JSON file holding the persisted session
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

impl SessionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("session.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Default login credentials, for scripted use
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: Option<String>,

    /// Stored securely in memory and zeroized on drop; never written back out
    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_gateway_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_proxy_prefix() -> String {
    "/api".to_string()
}

fn default_session_path() -> String {
    ".ptrack/session.json".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PortalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.api.gateway_url, "http://localhost:8080");
        assert_eq!(config.api.proxy_prefix, "/api");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: PortalConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.session.path, ".ptrack/session.json");
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = PortalConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("log_level"));
    }

    #[test]
    fn test_invalid_origin() {
        let mut config = PortalConfig::default();
        config.api.origin = "not a url".to_string();
        assert!(config.validate().unwrap_err().contains("api.origin"));
    }

    #[test]
    fn test_proxy_prefix_must_be_absolute() {
        let mut config = PortalConfig::default();
        config.api.proxy_prefix = "api".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = PortalConfig::default();
        config.api.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = PortalConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            "Development".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_password_is_not_serialized() {
        let mut config = PortalConfig::default();
        config.credentials.username = Some("doctor".to_string());
        config.credentials.password = Some(crate::config::secret_string("password".into()));
        let rendered = toml::to_string(&config).unwrap();
        assert!(rendered.contains("doctor"));
        assert!(!rendered.contains("password ="));
    }
}
