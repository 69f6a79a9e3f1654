//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PortalConfig;
use super::secret::secret_string;
use crate::domain::errors::TrackError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PortalConfig
/// 4. Applies environment variable overrides (PTRACK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced variable is
/// unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use patient_track::config::loader::load_config;
///
/// let config = load_config("ptrack.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PortalConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TrackError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TrackError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: PortalConfig = toml::from_str(&contents)
        .map_err(|e| TrackError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Like [`load_config`], but a missing file yields the built-in defaults
///
/// Environment overrides and validation still apply, so `ptrack` works
/// without a configuration file.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<PortalConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        finish(PortalConfig::default())
    }
}

fn finish(mut config: PortalConfig) -> Result<PortalConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        TrackError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TrackError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TrackError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PTRACK_* prefix
///
/// Variables follow the pattern PTRACK_<SECTION>_<KEY>, for example
/// PTRACK_API_GATEWAY_URL or PTRACK_SESSION_PATH. PTRACK_ENVIRONMENT sets
/// the runtime environment.
fn apply_env_overrides(config: &mut PortalConfig) -> Result<()> {
    if let Ok(val) = std::env::var("PTRACK_ENVIRONMENT") {
        config.environment = val.parse().map_err(TrackError::Configuration)?;
    }

    // Application overrides
    if let Ok(val) = std::env::var("PTRACK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Ok(val) = std::env::var("PTRACK_API_ORIGIN") {
        config.api.origin = val;
    }
    if let Ok(val) = std::env::var("PTRACK_API_GATEWAY_URL") {
        config.api.gateway_url = val;
    }
    if let Ok(val) = std::env::var("PTRACK_API_PROXY_PREFIX") {
        config.api.proxy_prefix = val;
    }
    if let Ok(val) = std::env::var("PTRACK_API_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.api.timeout_seconds = Some(secs);
        }
    }

    // Session overrides
    if let Ok(val) = std::env::var("PTRACK_SESSION_PATH") {
        config.session.path = val;
    }

    // Credential overrides
    if let Ok(val) = std::env::var("PTRACK_CREDENTIALS_USERNAME") {
        config.credentials.username = Some(val);
    }
    if let Ok(val) = std::env::var("PTRACK_CREDENTIALS_PASSWORD") {
        config.credentials.password = Some(secret_string(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PTRACK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PTRACK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PTRACK_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
