//! HTTP API Client
//!
//! Every call to the SaaS Notes backend goes through [`request`], which
//! attaches the stored bearer token and normalizes failures into [`ApiError`].

use gloo_net::http::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::state::global::{Id, Note, Tenant, User};
use crate::state::session;

pub const PRODUCTION_API_BASE: &str = "https://saas-notes-backend.vercel.app/api";

/// Dev builds talk to the `/api` proxy of the dev server
pub const DEVELOPMENT_API_BASE: &str = "/api";

pub const NETWORK_ERROR: &str = "Network error";
pub const REQUEST_FAILED: &str = "Request failed";
pub const NOTE_LIMIT_CODE: &str = "NOTE_LIMIT_REACHED";

/// API base URL, fixed at build time
pub fn get_api_base() -> &'static str {
    let url = match option_env!("SAAS_NOTES_API_URL") {
        Some(url) => url,
        None if cfg!(debug_assertions) => DEVELOPMENT_API_BASE,
        None => PRODUCTION_API_BASE,
    };
    url.trim_end_matches('/')
}

// ============ Response Types ============

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl ApiError {
    fn message(message: &str) -> Self {
        Self {
            error: message.to_string(),
            code: None,
        }
    }

    /// Free-plan ceiling hit on create
    pub fn is_note_limit(&self) -> bool {
        match &self.code {
            Some(code) => code == NOTE_LIMIT_CODE,
            None => self.error.contains("Note limit reached"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(serde::Serialize)]
struct NoteRequest<'a> {
    title: &'a str,
    content: &'a str,
}

// ============ Gateway ============

/// Issue one request; `Ok(None)` for 204 No Content
pub async fn request<T: DeserializeOwned>(
    method: Method,
    endpoint: &str,
    body: Option<String>,
) -> Result<Option<T>, ApiError> {
    let url = format!("{}{}", get_api_base(), endpoint);

    let mut builder = RequestBuilder::new(&url)
        .method(method)
        .header("Content-Type", "application/json");
    if let Some(token) = session::token() {
        builder = builder.header("Authorization", &format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|_| ApiError::message(NETWORK_ERROR))?;

    let response = request.send().await.map_err(|e| {
        web_sys::console::warn_1(&format!("{} {} failed: {}", url, NETWORK_ERROR, e).into());
        ApiError::message(NETWORK_ERROR)
    })?;

    if !response.ok() {
        let mut error: ApiError = response
            .json()
            .await
            .unwrap_or_else(|_| ApiError::message(REQUEST_FAILED));
        if error.error.is_empty() {
            error.error = REQUEST_FAILED.to_string();
        }
        return Err(error);
    }

    if response.status() == 204 {
        return Ok(None);
    }

    response
        .json()
        .await
        .map(Some)
        .map_err(|_| ApiError::message(REQUEST_FAILED))
}

async fn fetch<T: DeserializeOwned>(
    method: Method,
    endpoint: &str,
    body: Option<String>,
) -> Result<T, ApiError> {
    request(method, endpoint, body)
        .await?
        .ok_or_else(|| ApiError::message(REQUEST_FAILED))
}

/// Like [`fetch`] but any body is ignored
async fn execute(method: Method, endpoint: &str, body: Option<String>) -> Result<(), ApiError> {
    request::<serde_json::Value>(method, endpoint, body)
        .await
        .map(|_| ())
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|_| ApiError::message(REQUEST_FAILED))
}

// ============ API Functions ============

/// Log in to a tenant
pub async fn login(email: &str, password: &str, tenant: &str) -> Result<LoginResponse, ApiError> {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "tenant": tenant,
    });
    fetch(Method::POST, "/auth/login", Some(body.to_string())).await
}

/// Fetch the caller's tenant
pub async fn fetch_tenant() -> Result<Tenant, ApiError> {
    fetch(Method::GET, "/tenant", None).await
}

/// Fetch the caller's notes
pub async fn fetch_notes() -> Result<Vec<Note>, ApiError> {
    fetch(Method::GET, "/notes", None).await
}

pub async fn create_note(title: &str, content: &str) -> Result<(), ApiError> {
    let body = to_body(&NoteRequest { title, content })?;
    execute(Method::POST, "/notes", Some(body)).await
}

pub async fn update_note(id: &Id, title: &str, content: &str) -> Result<(), ApiError> {
    let body = to_body(&NoteRequest { title, content })?;
    execute(Method::PUT, &note_path(id), Some(body)).await
}

pub async fn delete_note(id: &Id) -> Result<(), ApiError> {
    execute(Method::DELETE, &note_path(id), None).await
}

/// Upgrade a tenant to Pro (admin only)
pub async fn upgrade_tenant(tenant: &Id) -> Result<(), ApiError> {
    let path = format!("/tenants/{}/upgrade", urlencoding::encode(&tenant.to_string()));
    execute(Method::POST, &path, None).await
}

fn note_path(id: &Id) -> String {
    format!("/notes/{}", urlencoding::encode(&id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_path_encoding() {
        assert_eq!(note_path(&Id::Number(7)), "/notes/7");
        assert_eq!(note_path(&Id::Text("a b/c".to_string())), "/notes/a%20b%2Fc");
    }

    #[test]
    fn test_note_limit_detection() {
        let structured: ApiError =
            serde_json::from_str(r#"{"error":"Quota","code":"NOTE_LIMIT_REACHED"}"#).unwrap();
        assert!(structured.is_note_limit());

        let phrase = ApiError::message("Note limit reached. Upgrade to Pro for unlimited notes.");
        assert!(phrase.is_note_limit());

        assert!(!ApiError::message("Forbidden").is_note_limit());
    }
}
