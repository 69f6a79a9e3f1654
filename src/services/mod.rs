//! Service facades
//!
//! One facade per backend area. Every method issues exactly one HTTP call
//! through the shared [`ApiClient`](crate::adapters::http::ApiClient) and
//! returns the decoded body; errors propagate untouched. The facades hold
//! no state of their own and read the cached identity (`userId`,
//! `organizationId`) from the session only where a route needs it.
//!
//! # Example
//!
//! ```rust,no_run
//! use patient_track::adapters::http::{ApiClient, LoggingNavigator};
//! use patient_track::adapters::storage::MemorySessionStore;
//! use patient_track::core::context::AuthContext;
//! use patient_track::services::DoctorService;
//! use std::sync::Arc;
//!
//! # async fn example() -> patient_track::domain::Result<()> {
//! let context = AuthContext::init(Arc::new(MemorySessionStore::new()))?;
//! let client = ApiClient::with_base_url("http://localhost:8080", context, Arc::new(LoggingNavigator))?;
//!
//! let patients = DoctorService::new(client).patients().await?;
//! println!("{} patients", patients.len());
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod auth;
pub mod doctor;
pub mod lab;
pub mod patient;
pub mod technician;

pub use admin::AdminService;
pub use auth::AuthService;
pub use doctor::DoctorService;
pub use lab::LabService;
pub use patient::PatientService;
pub use technician::TechnicianService;

use crate::adapters::http::ApiClient;
use crate::domain::{Result, SessionKey, TrackError, UserId};

/// Cached user id, required by routes addressed by it
pub(crate) fn session_user_id(client: &ApiClient) -> Result<UserId> {
    client
        .auth()
        .session()
        .user_id
        .ok_or_else(|| TrackError::MissingIdentity("User ID".to_string()))
}

/// Cached organization id as a query parameter, if one is stored
pub(crate) fn organization_query(client: &ApiClient) -> Vec<(&'static str, String)> {
    client
        .auth()
        .store()
        .get(SessionKey::OrganizationId)
        .filter(|id| !id.is_empty())
        .map(|id| vec![("organizationId", id)])
        .unwrap_or_default()
}

