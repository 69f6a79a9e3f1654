//! User-facing error messages
//!
//! Screens catch errors at the point of a user action and show a short
//! notification. This module turns a [`TrackError`] into that text.

use crate::domain::{ApiError, TrackError};
use std::fmt;

/// The user action that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Load,
    Create,
    Update,
    Delete,
    Submit,
}

impl Operation {
    fn fallback(&self) -> &'static str {
        match self {
            Operation::Login => "Login failed. Please try again.",
            Operation::Load => "Failed to load data. Please try again.",
            Operation::Create => "Failed to create record. Please check the details and try again.",
            Operation::Update => "Failed to update record. Please check the details and try again.",
            Operation::Delete => "Failed to delete record. Please try again.",
            Operation::Submit => "Failed to submit result. Please try again.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Login => "login",
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Submit => "submit",
        };
        f.write_str(name)
    }
}

pub const CANNOT_CONNECT: &str = "Cannot connect to server. Please check your connection.";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password. Please try again.";
pub const ACCOUNT_INACTIVE: &str = "Access denied. Your account may be inactive.";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
pub const SERVICE_UNAVAILABLE: &str =
    "Service temporarily unavailable. Please wait a moment and try again.";

/// Message to show the user when `operation` failed with `error`
///
/// Server-provided messages win for rejected input (400/409) and for
/// permission failures outside of login.
///
/// ```
/// use patient_track::core::messages::{user_message, Operation};
/// use patient_track::domain::{ApiError, TrackError};
///
/// let err = TrackError::Api(ApiError::Conflict { message: Some("Username already exists".into()) });
/// assert_eq!(user_message(&err, Operation::Create), "Username already exists");
/// ```
pub fn user_message(error: &TrackError, operation: Operation) -> String {
    let api = match error {
        TrackError::Api(api) => api,
        TrackError::Cancelled => return "Operation cancelled.".to_string(),
        TrackError::MissingIdentity(_) => return format!("{error}. {SESSION_EXPIRED}"),
        other => return other.to_string(),
    };

    let server = api.server_message().map(str::to_string);
    let login = operation == Operation::Login;

    match api {
        ApiError::Connection(_) => CANNOT_CONNECT.to_string(),
        ApiError::Unauthorized if login => INVALID_CREDENTIALS.to_string(),
        ApiError::Unauthorized => SESSION_EXPIRED.to_string(),
        ApiError::Forbidden { .. } if login => ACCOUNT_INACTIVE.to_string(),
        ApiError::Forbidden { .. } => server.unwrap_or_else(|| PERMISSION_DENIED.to_string()),
        ApiError::Server { status: 503, .. } => SERVICE_UNAVAILABLE.to_string(),
        ApiError::Server { .. } if login => server.unwrap_or_else(|| SERVER_ERROR.to_string()),
        ApiError::Server { .. } => SERVER_ERROR.to_string(),
        ApiError::InvalidResponse(_) => SERVER_ERROR.to_string(),
        ApiError::BadRequest { .. }
        | ApiError::Conflict { .. }
        | ApiError::NotFound { .. }
        | ApiError::Client { .. } => server.unwrap_or_else(|| operation.fallback().to_string()),
    }
}
