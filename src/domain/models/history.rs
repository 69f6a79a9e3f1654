//! Clinical visit history with nested medication lists

use crate::domain::ids::{HistoryId, PatientId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A medication prescribed during a visit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Kept verbatim; the backend stores it as free text
    #[serde(default)]
    pub prescribed_date: Option<String>,
    #[serde(default)]
    pub prescribed_by: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// One visit in a patient's history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HistoryId>,
    #[serde(default)]
    pub patient_id: Option<PatientId>,
    #[serde(default)]
    pub doctor_id: Option<UserId>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "super::timestamp::minutes")]
    pub visit_date: Option<NaiveDateTime>,
    #[serde(default, with = "super::timestamp::lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "super::timestamp::lenient", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub medications: Vec<Medication>,
}

impl VisitRecord {
    /// Medications still marked active
    pub fn active_medications(&self) -> impl Iterator<Item = &Medication> {
        self.medications.iter().filter(|m| m.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visit_with_medications() {
        let visit: VisitRecord = serde_json::from_value(json!({
            "id": 5,
            "patientId": 11,
            "doctorId": 2,
            "diagnosis": "Hypertension",
            "treatment": "Lifestyle changes",
            "visitDate": "2025-02-14T11:00:00",
            "medications": [
                {"id": 1, "name": "Amlodipine", "dosage": "5mg", "active": true,
                 "prescribedDate": "2025-02-14"},
                {"id": 2, "name": "Aspirin", "dosage": "81mg", "active": false}
            ]
        }))
        .unwrap();

        assert_eq!(visit.medications.len(), 2);
        assert_eq!(visit.active_medications().count(), 1);
        assert_eq!(
            visit.medications[0].prescribed_date.as_deref(),
            Some("2025-02-14")
        );
    }

    #[test]
    fn test_missing_medications_is_empty_list() {
        let visit: VisitRecord = serde_json::from_value(json!({"id": 1})).unwrap();
        assert!(visit.medications.is_empty());
    }

    #[test]
    fn test_visit_date_round_trips() {
        let raw = json!({
            "patientId": 11,
            "diagnosis": "Flu",
            "visitDate": "2025-02-14T11:00",
            "medications": [{"name": "Oseltamivir", "active": true}]
        });
        let visit: VisitRecord = serde_json::from_value(raw).unwrap();
        let back = serde_json::to_value(&visit).unwrap();
        assert_eq!(back["visitDate"], "2025-02-14T11:00");
        assert_eq!(back["medications"][0]["name"], "Oseltamivir");
        assert!(back.get("id").is_none());
    }

    #[test]
    fn test_visit_date_written_at_minute_precision() {
        let visit: VisitRecord = serde_json::from_value(json!({
            "visitDate": "2025-02-14T11:00:45",
            "createdAt": "2025-02-14T11:05"
        }))
        .unwrap();
        let back = serde_json::to_value(&visit).unwrap();
        assert_eq!(back["visitDate"], "2025-02-14T11:00");
        assert_eq!(back["createdAt"], "2025-02-14T11:05:00");
    }

    #[test]
    fn test_null_and_blank_visit_date() {
        let visit: VisitRecord =
            serde_json::from_value(json!({"visitDate": null})).unwrap();
        assert!(visit.visit_date.is_none());
        let visit: VisitRecord = serde_json::from_value(json!({"visitDate": ""})).unwrap();
        assert!(visit.visit_date.is_none());
        assert!(serde_json::to_value(&visit).unwrap()["visitDate"].is_null());
    }

    #[test]
    fn test_malformed_visit_date_is_rejected() {
        let result: Result<VisitRecord, _> =
            serde_json::from_value(json!({"visitDate": "next tuesday"}));
        assert!(result.is_err());
    }
}
