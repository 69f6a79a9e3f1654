//! Logging and observability
//!
//! This module provides structured logging with:
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//!
//! Bearer tokens and passwords are never passed to a log macro.
//!
//! # Example
//!
//! ```no_run
//! use patient_track::logging::init_logging;
//! use patient_track::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a failed API call
///
/// # Example
///
/// ```
/// use patient_track::log_api_failure;
/// use patient_track::domain::ApiError;
///
/// let error = ApiError::from_status(404, None);
/// log_api_failure!("GET", "/patient/profile", &error);
/// ```
#[macro_export]
macro_rules! log_api_failure {
    ($method:expr, $path:expr, $error:expr) => {
        tracing::warn!(
            method = %$method,
            path = %$path,
            status = ?$error.status(),
            error = %$error,
            "API request failed"
        );
    };
}

/// Log a session teardown
///
/// # Example
///
/// ```
/// use patient_track::log_session_cleared;
///
/// log_session_cleared!("logout");
/// ```
#[macro_export]
macro_rules! log_session_cleared {
    ($reason:expr) => {
        tracing::info!(reason = $reason, "Session cleared");
    };
}
