//! Configuration management for Patient Track.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! - Environment variable substitution (`${VAR_NAME}`) inside the file
//! - `PTRACK_<SECTION>_<KEY>` environment overrides
//! - Defaults for every setting, so the file itself is optional
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [api]
//! origin = "https://portal.example-hospital.org"
//! gateway_url = "http://localhost:8080"
//! proxy_prefix = "/api"
//!
//! [session]
//! path = ".ptrack/session.json"
//!
//! [credentials]
//! username = "doctor"
//! password = "${PTRACK_PASSWORD}"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! # Base URL selection
//!
//! With `environment = "development"` and an `api.origin` on `localhost` or
//! `127.0.0.1`, requests go straight to `api.gateway_url`. In every other
//! case they go to `api.origin` + `api.proxy_prefix`.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApiConfig, ApplicationConfig, CredentialsConfig, Environment, LoggingConfig, PortalConfig,
    SessionConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
