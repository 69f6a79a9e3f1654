//! User administration endpoints

use crate::adapters::http::ApiClient;
use crate::domain::models::{Ack, CreateUserRequest, User};
use crate::domain::{Result, UserId};

#[derive(Debug, Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.client.get("/admin/users").await
    }

    pub async fn list_doctors(&self) -> Result<Vec<User>> {
        self.client.get("/admin/users/doctors").await
    }

    pub async fn list_patients(&self) -> Result<Vec<User>> {
        self.client.get("/admin/users/patients").await
    }

    pub async fn get_user(&self, id: UserId) -> Result<User> {
        self.client.get(&format!("/admin/users/{id}")).await
    }

    /// Create a user; a taken username comes back as `ApiError::Conflict`
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        self.client.post("/admin/users", request).await
    }

    pub async fn update_user(&self, id: UserId, request: &CreateUserRequest) -> Result<User> {
        self.client.put(&format!("/admin/users/{id}"), request).await
    }

    pub async fn activate_user(&self, id: UserId) -> Result<Ack> {
        self.client
            .put_empty(&format!("/admin/users/{id}/activate"))
            .await
    }

    pub async fn deactivate_user(&self, id: UserId) -> Result<Ack> {
        self.client
            .put_empty(&format!("/admin/users/{id}/deactivate"))
            .await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<Ack> {
        self.client.delete(&format!("/admin/users/{id}")).await
    }

    /// Dashboard counters; the shape is owned by the backend
    pub async fn stats(&self) -> Result<serde_json::Value> {
        self.client.get("/admin/stats").await
    }
}
