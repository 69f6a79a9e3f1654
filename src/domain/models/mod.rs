//! Wire records exchanged with the backend
//!
//! Field names follow the backend's camelCase JSON. Everything the server
//! may omit or send as `null` is an `Option`, and unknown fields are
//! ignored so newer backends do not break older clients.

pub mod auth;
pub mod history;
pub mod lab;
pub mod patient;
pub mod timestamp;
pub mod user;

pub use auth::{Credentials, TokenResponse};
pub use history::{Medication, VisitRecord};
pub use lab::{
    LabPrescription, LabResult, LabResultUpdate, LabTestType, NewLabPrescription, NewLabResult,
    PrescriptionStatus, ResultDocument, ResultStatus, ResultSubmission,
};
pub use patient::PatientRecord;
pub use user::{CreateUserRequest, User};

/// Acknowledgement body of mutating calls (often empty)
pub type Ack = serde_json::Value;
