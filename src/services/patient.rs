//! Patient self-service endpoints

use super::session_user_id;
use crate::adapters::http::ApiClient;
use crate::domain::models::{Ack, PatientRecord, User, VisitRecord};
use crate::domain::{HistoryId, PatientId, Result};

#[derive(Debug, Clone)]
pub struct PatientService {
    client: ApiClient,
}

impl PatientService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Own profile, resolved server-side from `X-User-Id`
    ///
    /// `None` when the backend has no profile yet (empty 204 body).
    pub async fn profile(&self) -> Result<Option<User>> {
        self.client.get("/patient/profile").await
    }

    /// Medical details of the signed-in patient
    pub async fn medical_details(&self) -> Result<PatientRecord> {
        let user_id = session_user_id(&self.client)?;
        self.client
            .get(&format!("/patient/medical-details/{user_id}"))
            .await
    }

    /// Own visit history
    pub async fn history(&self) -> Result<Vec<VisitRecord>> {
        self.client.get("/patient/history").await
    }

    pub async fn history_for(&self, patient: PatientId) -> Result<Vec<VisitRecord>> {
        self.client
            .get(&format!("/patient/history/{patient}"))
            .await
    }

    pub async fn add_history(&self, visit: &VisitRecord) -> Result<VisitRecord> {
        self.client.post("/patient/history", visit).await
    }

    pub async fn update_history(&self, id: HistoryId, visit: &VisitRecord) -> Result<VisitRecord> {
        self.client
            .put(&format!("/patient/history/{id}"), visit)
            .await
    }

    pub async fn delete_history(&self, id: HistoryId) -> Result<Ack> {
        self.client.delete(&format!("/patient/history/{id}")).await
    }
}
