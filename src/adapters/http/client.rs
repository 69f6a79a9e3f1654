//! HTTP client for the Patient Track backend
//!
//! Every request the application makes goes through [`ApiClient`]. It adds
//! the session headers, classifies failures into [`ApiError`] and performs
//! the global teardown when the backend answers 401.

use super::base_url::resolve_base_url;
use super::navigator::Navigator;
use crate::config::PortalConfig;
use crate::core::context::AuthContext;
use crate::core::guard::Route;
use crate::domain::{ApiError, Result, SessionKey, TrackError};
use crate::log_api_failure;
use reqwest::multipart::Form;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Header carrying the cached user id
pub const USER_ID_HEADER: &str = "X-User-Id";

/// API client bound to one session
///
/// Cloning is cheap; clones share the connection pool, the session context
/// and the navigator.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth: AuthContext,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL cannot be resolved or
    /// the HTTP client cannot be built.
    pub fn new(
        config: &PortalConfig,
        auth: AuthContext,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let base_url = resolve_base_url(config)?;
        let timeout = config.api.timeout_seconds.map(Duration::from_secs);
        Self::build(base_url, timeout, auth, navigator)
    }

    /// Create a client against an explicit base URL
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn with_base_url(
        base_url: impl Into<String>,
        auth: AuthContext,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Self::build(base_url.into(), None, auth, navigator)
    }

    fn build(
        base_url: String,
        timeout: Option<Duration>,
        auth: AuthContext,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(|e| {
            TrackError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session context the client reads headers from
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// `GET path`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::GET, path, self.request(Method::GET, path))
            .await
    }

    /// `GET path?query`
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let builder = self.request(Method::GET, path).query(query);
        self.execute(Method::GET, path, builder).await
    }

    /// `GET path`, mapping 404 to `None`
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.get::<Option<T>>(path).await {
            Err(TrackError::Api(ApiError::NotFound { .. })) => {
                tracing::debug!(path = %path, "Resource not found");
                Ok(None)
            }
            other => other,
        }
    }

    /// `POST path` with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.execute(Method::POST, path, builder).await
    }

    /// `POST path` with a JSON body and query parameters
    pub async fn post_with_query<B, T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).query(query).json(body);
        self.execute(Method::POST, path, builder).await
    }

    /// `POST path` with no body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::POST, path, self.request(Method::POST, path))
            .await
    }

    /// `POST path` as `multipart/form-data`
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let builder = self.request(Method::POST, path).multipart(form);
        self.execute(Method::POST, path, builder).await
    }

    /// `PUT path` with a JSON body
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(body);
        self.execute(Method::PUT, path, builder).await
    }

    /// `PUT path` with no body
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::PUT, path, self.request(Method::PUT, path))
            .await
    }

    /// `PUT path?query` with no body
    pub async fn put_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let builder = self.request(Method::PUT, path).query(query);
        self.execute(Method::PUT, path, builder).await
    }

    /// `DELETE path`
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::DELETE, path, self.request(Method::DELETE, path))
            .await
    }

    /// Start a request with the session headers attached
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);

        if let Some(token) = self.auth.token() {
            builder = builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(user_id) = self.auth.store().get(SessionKey::UserId) {
            builder = builder.header(USER_ID_HEADER, user_id);
        }

        builder
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T> {
        tracing::debug!(method = %method, path = %path, "Sending request");

        let response = builder.send().await.map_err(|e| {
            let err = ApiError::Connection(e.to_string());
            log_api_failure!(method, path, err);
            err
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized(&method, path);
            return Err(ApiError::Unauthorized.into());
        }

        let body = response.bytes().await.map_err(|e| {
            let err = ApiError::Connection(e.to_string());
            log_api_failure!(method, path, err);
            err
        })?;

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), extract_message(&body));
            log_api_failure!(method, path, err);
            return Err(err.into());
        }

        tracing::debug!(method = %method, path = %path, status = status.as_u16(), "Request succeeded");
        decode(&body)
    }

    /// Global 401 handling: tear the session down, then go to login
    fn handle_unauthorized(&self, method: &Method, path: &str) {
        log_api_failure!(method, path, ApiError::Unauthorized);
        if let Err(e) = self.auth.expire() {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
        self.navigator.navigate(Route::Login);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pull the server's explanation out of an error body
fn extract_message(body: &[u8]) -> Option<String> {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty());
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty() && !text.starts_with('{') && !text.starts_with('<')).then_some(text)
}

/// Decode a success body; an empty body is JSON `null`
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let parsed = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    parsed.map_err(|e| ApiError::InvalidResponse(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_prefers_message_field() {
        let body = br#"{"message":"Username already exists","error":"Conflict"}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("Username already exists")
        );
    }

    #[test]
    fn test_extract_message_falls_back_to_error_field() {
        assert_eq!(
            extract_message(br#"{"error":"Bad Request"}"#).as_deref(),
            Some("Bad Request")
        );
        assert_eq!(extract_message(br#"{"status":400}"#), None);
    }

    #[test]
    fn test_extract_message_plain_text() {
        assert_eq!(
            extract_message(b"Prescription already completed").as_deref(),
            Some("Prescription already completed")
        );
        assert_eq!(extract_message(b"<html>502</html>"), None);
        assert_eq!(extract_message(b""), None);
    }

    #[test]
    fn test_decode_empty_body_as_null() {
        let value: Option<u32> = decode(b"").unwrap();
        assert_eq!(value, None);
        let ack: serde_json::Value = decode(b"  ").unwrap();
        assert!(ack.is_null());
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let err = decode::<Vec<u32>>(br#"{"content":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            TrackError::Api(ApiError::InvalidResponse(_))
        ));
    }
}
