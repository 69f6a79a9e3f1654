//! Lab prescription and result endpoints
//!
//! Covers the whole prescription lifecycle: a doctor prescribes a test, a
//! technician accepts it (status `ACCEPTED` plus a `DRAFT` result), fills
//! the result in and submits it.

use crate::adapters::http::ApiClient;
use crate::domain::models::{
    Ack, LabPrescription, LabResult, LabResultUpdate, LabTestType, NewLabPrescription,
    NewLabResult, PrescriptionStatus,
};
use crate::domain::{OrganizationId, PatientId, PrescriptionId, Result, ResultId, UserId};
use futures::future::try_join_all;

#[derive(Debug, Clone)]
pub struct LabService {
    client: ApiClient,
}

impl LabService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn test_types(&self) -> Result<Vec<LabTestType>> {
        self.client.get("/lab/test-types").await
    }

    pub async fn create_prescription(
        &self,
        prescription: &NewLabPrescription,
    ) -> Result<LabPrescription> {
        self.client
            .post("/lab/prescription/create", prescription)
            .await
    }

    pub async fn prescription(&self, id: PrescriptionId) -> Result<LabPrescription> {
        self.client.get(&format!("/lab/prescription/{id}")).await
    }

    pub async fn prescriptions_for_patient(
        &self,
        patient: PatientId,
    ) -> Result<Vec<LabPrescription>> {
        self.client
            .get(&format!("/lab/prescriptions/patient/{patient}"))
            .await
    }

    pub async fn prescriptions_for_doctor(
        &self,
        doctor: UserId,
        organization: OrganizationId,
    ) -> Result<Vec<LabPrescription>> {
        let query = [
            ("doctorId", doctor.to_string()),
            ("organizationId", organization.to_string()),
        ];
        self.client
            .get_with_query("/lab/prescriptions/doctor", &query)
            .await
    }

    pub async fn pending_prescriptions(
        &self,
        organization: OrganizationId,
    ) -> Result<Vec<LabPrescription>> {
        let query = [("organizationId", organization.to_string())];
        self.client
            .get_with_query("/lab/prescriptions/pending", &query)
            .await
    }

    pub async fn update_prescription_status(
        &self,
        id: PrescriptionId,
        status: PrescriptionStatus,
    ) -> Result<Ack> {
        let query = [("status", status.as_str().to_string())];
        self.client
            .put_with_query(&format!("/lab/prescription/{id}/status"), &query)
            .await
    }

    pub async fn delete_prescription(&self, id: PrescriptionId) -> Result<Ack> {
        self.client
            .delete(&format!("/lab/prescription/{id}"))
            .await
    }

    pub async fn create_result(&self, result: &NewLabResult) -> Result<LabResult> {
        self.client.post("/lab/result/create", result).await
    }

    pub async fn result(&self, id: ResultId) -> Result<LabResult> {
        self.client.get(&format!("/lab/result/{id}")).await
    }

    /// Result of a prescription; `None` while nothing has been recorded
    pub async fn result_for_prescription(
        &self,
        prescription: PrescriptionId,
    ) -> Result<Option<LabResult>> {
        self.client
            .get_optional(&format!("/lab/result/prescription/{prescription}"))
            .await
    }

    /// Results of several prescriptions, fetched concurrently
    ///
    /// The output is in the same order as `prescriptions`. The first failure
    /// other than 404 fails the whole batch.
    pub async fn results_for_prescriptions(
        &self,
        prescriptions: &[PrescriptionId],
    ) -> Result<Vec<Option<LabResult>>> {
        try_join_all(
            prescriptions
                .iter()
                .map(|id| self.result_for_prescription(*id)),
        )
        .await
    }

    pub async fn results_for_patient(&self, patient: PatientId) -> Result<Vec<LabResult>> {
        self.client
            .get(&format!("/lab/results/patient/{patient}"))
            .await
    }

    pub async fn results_for_technician(
        &self,
        technician: UserId,
        organization: OrganizationId,
    ) -> Result<Vec<LabResult>> {
        let query = [
            ("labTechnicianId", technician.to_string()),
            ("organizationId", organization.to_string()),
        ];
        self.client
            .get_with_query("/lab/results/technician", &query)
            .await
    }

    pub async fn update_result(&self, id: ResultId, update: &LabResultUpdate) -> Result<LabResult> {
        self.client
            .put(&format!("/lab/result/{id}/update"), update)
            .await
    }

    /// Move a draft result to `SUBMITTED`
    pub async fn submit_draft_result(&self, id: ResultId) -> Result<LabResult> {
        self.client
            .put_empty(&format!("/lab/result/{id}/submit"))
            .await
    }
}
