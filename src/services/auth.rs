//! Authentication endpoints

use crate::adapters::http::ApiClient;
use crate::domain::models::{Ack, Credentials, TokenResponse};
use crate::domain::Result;

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`
    ///
    /// Only issues the request; storing the session is the caller's job
    /// (see [`sign_in`](crate::core::login::sign_in)).
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        tracing::debug!(username = %credentials.username, "Requesting token");
        self.client.post("/auth/login", credentials).await
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<Ack> {
        self.client.post_empty("/auth/logout").await
    }
}
