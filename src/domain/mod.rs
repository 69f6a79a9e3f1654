//! Domain models and types for Patient Track.
//!
//! This module contains the client-side domain: roles, the session model,
//! typed identifiers, the records exchanged with the backend, and the
//! error hierarchy.
//!
//! # Overview
//!
//! - **Strongly-typed identifiers** ([`UserId`], [`OrganizationId`], [`PatientId`], ...)
//! - **Session model** ([`Session`], [`SessionKey`], [`AuthState`], [`Role`])
//! - **Wire records** ([`models`])
//! - **Paged lists** ([`Page`], [`PageResponse`])
//! - **Error types** ([`TrackError`], [`ApiError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, TrackError>`]:
//!
//! ```rust
//! use patient_track::domain::{ApiError, Result, TrackError};
//!
//! fn example() -> Result<()> {
//!     Err(TrackError::Api(ApiError::Connection("refused".to_string())))
//! }
//!
//! assert!(example().unwrap_err().as_api().is_some());
//! ```

pub mod errors;
pub mod ids;
pub mod models;
pub mod page;
pub mod result;
pub mod role;
pub mod session;

// Re-export commonly used types for convenience
pub use errors::{ApiError, TrackError};
pub use ids::{HistoryId, OrganizationId, PatientId, PrescriptionId, ResultId, TestTypeId, UserId};
pub use page::{Page, PageEnvelope, PageResponse};
pub use result::Result;
pub use role::Role;
pub use session::{AuthState, Session, SessionKey};
