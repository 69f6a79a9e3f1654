//! Domain error types
//!
//! This module defines the error hierarchy for the Patient Track client.
//! HTTP failures are classified into [`ApiError`] so callers can match on
//! the outcome without touching `reqwest` types.

use thiserror::Error;

/// Main Patient Track error type
///
/// This is the primary error type used throughout the library.
/// It wraps API failures and the local concerns (configuration, session
/// storage, identity lookups) that can fail before a request is sent.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Persisted session storage errors
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// A route needs an identity attribute the session does not hold
    #[error("{0} not found in session")]
    MissingIdentity(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// The screen that started the operation was closed
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl TrackError {
    /// Returns the API error if this error came from the remote API
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            TrackError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the failure was a 401 that already tore the session down
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TrackError::Api(ApiError::Unauthorized))
    }
}

/// Remote API errors
///
/// One variant per failure class the screens react to differently.
/// The optional messages carry the server-provided `message`/`error` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received (DNS, refused connection, reset, timeout)
    #[error("Cannot connect to server: {0}")]
    Connection(String),

    /// 401 - the session has been cleared and the user sent to login
    #[error("Authentication required")]
    Unauthorized,

    /// 403 - authenticated but not permitted; the session is kept
    #[error("Access denied{}", suffix(.message))]
    Forbidden { message: Option<String> },

    /// 400 - rejected input
    #[error("Bad request{}", suffix(.message))]
    BadRequest { message: Option<String> },

    /// 404
    #[error("Not found{}", suffix(.message))]
    NotFound { message: Option<String> },

    /// 409 - conflicting state (duplicate username, wrong workflow state)
    #[error("Conflict{}", suffix(.message))]
    Conflict { message: Option<String> },

    /// Any other 4xx
    #[error("Client error {status}{}", suffix(.message))]
    Client { status: u16, message: Option<String> },

    /// 5xx
    #[error("Server error {status}{}", suffix(.message))]
    Server { status: u16, message: Option<String> },

    /// The body did not decode into the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

fn suffix(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(": {m}"),
        _ => String::new(),
    }
}

impl ApiError {
    /// Classifies a non-success HTTP status
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            400 => ApiError::BadRequest { message },
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden { message },
            404 => ApiError::NotFound { message },
            409 => ApiError::Conflict { message },
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Client { status, message },
        }
    }

    /// HTTP status of the response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Connection(_) | ApiError::InvalidResponse(_) => None,
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::BadRequest { .. } => Some(400),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Conflict { .. } => Some(409),
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
        }
    }

    /// Server-provided message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Forbidden { message }
            | ApiError::BadRequest { message }
            | ApiError::NotFound { message }
            | ApiError::Conflict { message }
            | ApiError::Client { message, .. }
            | ApiError::Server { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for TrackError {
    fn from(err: std::io::Error) -> Self {
        TrackError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TrackError {
    fn from(err: serde_json::Error) -> Self {
        TrackError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TrackError {
    fn from(err: toml::de::Error) -> Self {
        TrackError::Configuration(format!("TOML parse error: {err}"))
    }
}
