//! Patient records managed by doctors

use crate::domain::ids::{PatientId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Patient demographic and medical summary
///
/// Used both as the response of the doctor patient routes and as the body
/// when creating or updating a patient (with `id` left empty).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PatientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub current_medications: Option<String>,
    #[serde(default, with = "super::timestamp::lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "super::timestamp::lenient", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}
