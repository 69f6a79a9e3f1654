//! Doctor workspace endpoints

use super::{organization_query, session_user_id};
use crate::adapters::http::ApiClient;
use crate::domain::models::{Ack, PatientRecord, User};
use crate::domain::{PatientId, Result, UserId};

#[derive(Debug, Clone)]
pub struct DoctorService {
    client: ApiClient,
}

impl DoctorService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Profile of the signed-in doctor
    ///
    /// # Errors
    ///
    /// `TrackError::MissingIdentity` if no user id is cached; no request is
    /// sent in that case.
    pub async fn profile(&self) -> Result<User> {
        let user_id = session_user_id(&self.client)?;
        self.client.get(&format!("/doctor/profile/{user_id}")).await
    }

    /// Patients of the doctor's organization
    pub async fn patients(&self) -> Result<Vec<PatientRecord>> {
        let query = organization_query(&self.client);
        self.client.get_with_query("/doctor/patients", &query).await
    }

    pub async fn patient(&self, id: PatientId) -> Result<PatientRecord> {
        self.client.get(&format!("/doctor/patients/{id}")).await
    }

    pub async fn create_patient(&self, patient: &PatientRecord) -> Result<PatientRecord> {
        let query = organization_query(&self.client);
        self.client
            .post_with_query("/doctor/patients", &query, patient)
            .await
    }

    pub async fn update_patient(
        &self,
        id: PatientId,
        patient: &PatientRecord,
    ) -> Result<PatientRecord> {
        self.client
            .put(&format!("/doctor/patients/{id}"), patient)
            .await
    }

    pub async fn delete_patient(&self, id: PatientId) -> Result<Ack> {
        self.client.delete(&format!("/doctor/patients/{id}")).await
    }

    /// Search doctors by name and/or id; absent filters are not sent
    pub async fn search_doctors(&self, name: Option<&str>, id: Option<UserId>) -> Result<Vec<User>> {
        let mut query = Vec::new();
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            query.push(("name", name.to_string()));
        }
        if let Some(id) = id {
            query.push(("id", id.to_string()));
        }
        self.client.get_with_query("/doctor/search", &query).await
    }

    pub async fn colleagues(&self) -> Result<Vec<User>> {
        self.client.get("/doctor/colleagues").await
    }
}
