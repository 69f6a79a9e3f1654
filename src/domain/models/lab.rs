//! Lab prescriptions, results and test types
//!
//! The workflow (prescription PENDING -> ACCEPTED, result DRAFT ->
//! SUBMITTED) is enforced by the lab service. These types only carry the
//! status values the client sends and displays.

use crate::domain::ids::{
    OrganizationId, PatientId, PrescriptionId, ResultId, TestTypeId, UserId,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a lab prescription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrescriptionStatus {
    Pending,
    Accepted,
    Completed,
    Cancelled,
}

impl PrescriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrescriptionStatus::Pending => "PENDING",
            PrescriptionStatus::Accepted => "ACCEPTED",
            PrescriptionStatus::Completed => "COMPLETED",
            PrescriptionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrescriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(PrescriptionStatus::Pending),
            "ACCEPTED" => Ok(PrescriptionStatus::Accepted),
            "COMPLETED" => Ok(PrescriptionStatus::Completed),
            "CANCELLED" => Ok(PrescriptionStatus::Cancelled),
            other => Err(format!("Unknown prescription status '{other}'")),
        }
    }
}

/// Status of a lab result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultStatus {
    Draft,
    Submitted,
    Reviewed,
    Released,
}

impl ResultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Draft => "DRAFT",
            ResultStatus::Submitted => "SUBMITTED",
            ResultStatus::Reviewed => "REVIEWED",
            ResultStatus::Released => "RELEASED",
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lab test ordered by a doctor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabPrescription {
    pub id: PrescriptionId,
    #[serde(default)]
    pub patient_id: Option<PatientId>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<UserId>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
    #[serde(default)]
    pub test_name: Option<String>,
    #[serde(default)]
    pub test_type: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub status: Option<PrescriptionStatus>,
    #[serde(default, with = "super::timestamp::lenient")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "super::timestamp::lenient")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body of `POST /lab/prescription/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabPrescription {
    pub patient_id: PatientId,
    pub doctor_id: UserId,
    pub organization_id: OrganizationId,
    pub test_name: String,
    pub test_type: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// A lab result attached to a prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    pub id: ResultId,
    #[serde(default)]
    pub prescription_id: Option<PrescriptionId>,
    #[serde(default)]
    pub patient_id: Option<PatientId>,
    #[serde(default)]
    pub lab_technician_id: Option<UserId>,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
    #[serde(default)]
    pub result_data: Option<String>,
    #[serde(default)]
    pub reference_range: Option<String>,
    #[serde(default)]
    pub abnormal_flags: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<ResultStatus>,
    #[serde(default, with = "super::timestamp::lenient")]
    pub submitted_at: Option<NaiveDateTime>,
    #[serde(default, with = "super::timestamp::lenient")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "super::timestamp::lenient")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body of `POST /lab/result/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabResult {
    pub prescription_id: PrescriptionId,
    #[serde(default)]
    pub patient_id: Option<PatientId>,
    pub lab_technician_id: UserId,
    pub organization_id: OrganizationId,
    pub status: ResultStatus,
}

impl NewLabResult {
    /// Draft result opened when a technician accepts a prescription
    pub fn draft_for(
        prescription: &LabPrescription,
        technician: UserId,
        organization: OrganizationId,
    ) -> Self {
        Self {
            prescription_id: prescription.id,
            patient_id: prescription.patient_id,
            lab_technician_id: technician,
            organization_id: organization,
            status: ResultStatus::Draft,
        }
    }
}

/// Body of `PUT /lab/result/{id}/update`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResultUpdate {
    pub result_data: String,
    #[serde(default)]
    pub reference_range: String,
    #[serde(default)]
    pub abnormal_flags: String,
    #[serde(default)]
    pub notes: String,
}

/// Text fields of a multipart result submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSubmission {
    pub result_data: String,
    pub reference_range: Option<String>,
    pub abnormal_flags: Option<String>,
    pub notes: Option<String>,
}

/// A file attached to a result submission
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ResultDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A test that can be ordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTestType {
    pub id: TestTypeId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
    #[serde(default)]
    pub active: Option<bool>,
}
