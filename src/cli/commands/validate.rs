//! Validate config command implementation

use super::common::exit;
use crate::adapters::http::resolve_base_url;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit::CONFIGURATION);
            }
        };

        let base_url = match resolve_base_url(&config) {
            Ok(url) => url,
            Err(e) => {
                println!("❌ {e}");
                return Ok(exit::CONFIGURATION);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Portal Origin: {}", config.api.origin);
        println!("  API Base URL: {base_url}");
        match config.api.timeout_seconds {
            Some(secs) => println!("  Request Timeout: {secs}s"),
            None => println!("  Request Timeout: none"),
        }
        println!("  Session File: {}", config.session.path);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(exit::OK)
    }
}
