//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::common::exit;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ptrack.toml")]
    pub output: String,

    /// Include comments explaining every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit::CONFIGURATION);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set api.origin to the portal address");
                println!("  2. Validate configuration: ptrack validate-config");
                println!("  3. Sign in: ptrack login --username <name>");
                println!();
                Ok(exit::OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(exit::FATAL)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# Patient Track client configuration

environment = "production"

[application]
log_level = "info"

[api]
origin = "http://localhost:3000"
gateway_url = "http://localhost:8080"
proxy_prefix = "/api"

[session]
path = ".ptrack/session.json"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# Patient Track client configuration
#
# Every value below is optional and shows its default unless noted.
# Any value can be overridden with PTRACK_<SECTION>_<KEY>, for example
# PTRACK_API_ORIGIN or PTRACK_SESSION_PATH.

# ============================================================================
# Environment
# ============================================================================
# development | staging | production
# In development, a portal origin on localhost or 127.0.0.1 makes the
# client call api.gateway_url directly instead of the proxy prefix.
environment = "production"

[application]
# Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
log_level = "info"

# ============================================================================
# API
# ============================================================================
[api]
# Address the portal is served from
origin = "http://localhost:3000"

# Gateway used directly in development
gateway_url = "http://localhost:8080"

# Path prefix the portal proxies to the gateway
proxy_prefix = "/api"

# Request timeout in seconds (unset = no client-side timeout)
# timeout_seconds = 30

# ============================================================================
# Session
# ============================================================================
[session]
# JSON file holding token, role, organizationId, organizationName, userId
path = ".ptrack/session.json"

# ============================================================================
# Default credentials (optional)
# ============================================================================
# [credentials]
# username = "doctor"
# password = "${PTRACK_PASSWORD}"

# ============================================================================
# Logging
# ============================================================================
[logging]
# Write JSON logs to files in addition to stderr
local_enabled = false

# Directory of the log files
local_path = "./logs"

# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: PortalConfig = toml::from_str(&content).unwrap();
            assert!(config.validate().is_ok());
            assert_eq!(config.session.path, ".ptrack/session.json");
        }
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("ptrack.toml");
        fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), exit::CONFIGURATION);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# existing");
    }

    #[tokio::test]
    async fn test_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("ptrack.toml");
        fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: true,
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), exit::OK);
        assert!(fs::read_to_string(&output).unwrap().contains("[api]"));
    }
}
