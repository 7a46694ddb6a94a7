//! Notes API Client
//!
//! The single chokepoint for outbound traffic. Attaches the JSON content
//! type and the bearer token, normalizes error bodies and skips decoding
//! for 204 responses.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ClientError, ClientResult, REQUEST_FAILED};
use crate::model::{Id, LoginRequest, LoginResponse, Note, NoteInput, Session, Tenant};
use crate::session::SessionStore;

/// Notes API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

/// Error body convention of the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url`, reading tokens from `session`
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request to `<base-url><endpoint>`
    ///
    /// Returns `Ok(None)` for 204 No Content, the decoded body otherwise.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<Option<T>> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(method = %method, endpoint, "API request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %method, endpoint, "Network error: {}", e);
            ClientError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = body
                .error
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| REQUEST_FAILED.to_string());

            tracing::warn!(
                method = %method,
                endpoint,
                status = status.as_u16(),
                "API error: {}",
                message
            );

            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
                code: body.code,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(ClientError::Network)?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Request whose payload is required
    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<T> {
        self.request(method, endpoint, body)
            .await?
            .ok_or(ClientError::EmptyResponse)
    }

    /// Request whose payload, if any, is not used
    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<()> {
        self.request::<serde_json::Value>(method, endpoint, body)
            .await
            .map(|_| ())
    }

    /// `POST /auth/login`
    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<Session> {
        let body = serde_json::to_value(credentials)?;
        let response: LoginResponse = self.fetch(Method::POST, "/auth/login", Some(body)).await?;
        Ok(response.into())
    }

    /// `GET /tenant`
    pub async fn tenant(&self) -> ClientResult<Tenant> {
        self.fetch(Method::GET, "/tenant", None).await
    }

    /// `GET /notes`
    pub async fn list_notes(&self) -> ClientResult<Vec<Note>> {
        self.fetch(Method::GET, "/notes", None).await
    }

    /// `POST /notes`
    pub async fn create_note(&self, input: &NoteInput) -> ClientResult<()> {
        let body = serde_json::to_value(input)?;
        self.execute(Method::POST, "/notes", Some(body)).await
    }

    /// `PUT /notes/:id`
    pub async fn update_note(&self, id: &Id, input: &NoteInput) -> ClientResult<()> {
        let body = serde_json::to_value(input)?;
        self.execute(Method::PUT, &note_path(id), Some(body)).await
    }

    /// `DELETE /notes/:id`
    pub async fn delete_note(&self, id: &Id) -> ClientResult<()> {
        self.execute(Method::DELETE, &note_path(id), None).await
    }

    /// `POST /tenants/:id/upgrade`
    pub async fn upgrade_tenant(&self, tenant: &Id) -> ClientResult<()> {
        let endpoint = format!("/tenants/{}/upgrade", urlencoding::encode(&tenant.to_string()));
        self.execute(Method::POST, &endpoint, None).await
    }
}

fn note_path(id: &Id) -> String {
    format!("/notes/{}", urlencoding::encode(&id.to_string()))
}
