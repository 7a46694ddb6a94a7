//! In-process mock of the notes backend
//!
//! Serves the API contract under `/api` on an ephemeral port and records
//! every request it sees. Tenant `acme` starts on the free plan with a
//! limit of 3 and two notes.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::model::{Id, LoginRequest, Note, Plan, Role};

pub const ADMIN_TOKEN: &str = "token-acme-admin";
pub const MEMBER_TOKEN: &str = "token-acme-member";

/// What the mock saw on the wire
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug)]
pub struct MockState {
    pub plan: Plan,
    pub limit: u32,
    pub notes: Vec<Note>,
    pub next_id: i64,
    pub requests: Vec<RecordedRequest>,
    pub fail_tenant: bool,
    pub fail_delete: bool,
    pub fail_upgrade: bool,
    /// Send `{"code": "NOTE_LIMIT_REACHED"}` with reworded limit errors
    pub structured_limit_error: bool,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            plan: Plan::Free,
            limit: 3,
            notes: vec![
                seed_note(1, "Welcome", Some("First note"), "2024-01-01T09:00:00.000Z"),
                seed_note(2, "Ideas", None, "2024-01-02T09:00:00.000Z"),
            ],
            next_id: 3,
            requests: Vec::new(),
            fail_tenant: false,
            fail_delete: false,
            fail_upgrade: false,
            structured_limit_error: false,
        }
    }
}

pub fn seed_note(id: i64, title: &str, content: Option<&str>, created_at: &str) -> Note {
    Note {
        id: Id::Number(id),
        title: title.to_string(),
        content: content.map(str::to_string),
        created_at: created_at.to_string(),
    }
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    base_url: String,
    state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));

        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/tenant", get(tenant))
            .route("/notes", get(list_notes).post(create_note))
            .route("/notes/:id", put(update_note).delete(delete_note))
            .route("/tenants/:id/upgrade", post(upgrade))
            .route("/broken", get(broken))
            .route("/empty-error", get(empty_error));

        let app = Router::new()
            .nest("/api", api)
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    /// Number of recorded requests with this method and exact path
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state().notes.clone()
    }

    /// Replace the notes with `count` generated ones
    pub fn fill_notes(&self, count: i64) {
        let mut state = self.state();
        state.notes = (1..=count)
            .map(|i| seed_note(i, &format!("Note {}", i), None, "2024-02-01T00:00:00Z"))
            .collect();
        state.next_id = count + 1;
    }
}

pub fn acme_admin_login() -> LoginRequest {
    LoginRequest {
        email: "admin@acme.test".to_string(),
        password: "password".to_string(),
        tenant: "acme".to_string(),
    }
}

pub fn acme_member_login() -> LoginRequest {
    LoginRequest {
        email: "user@acme.test".to_string(),
        password: "password".to_string(),
        tenant: "acme".to_string(),
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let entry = {
        let headers = request.headers();
        RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            authorization: header_value(headers, header::AUTHORIZATION),
            content_type: header_value(headers, header::CONTENT_TYPE),
        }
    };
    state.lock().unwrap().requests.push(entry);
    next.run(request).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn caller(headers: &HeaderMap) -> Result<Role, Response> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    match auth.strip_prefix("Bearer ") {
        Some(ADMIN_TOKEN) => Ok(Role::Admin),
        Some(MEMBER_TOKEN) => Ok(Role::Member),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Unauthorized")),
    }
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
    tenant: String,
}

async fn login(Json(body): Json<LoginBody>) -> Response {
    let (id, role, token) = match body.email.as_str() {
        "admin@acme.test" => (1, "admin", ADMIN_TOKEN),
        "user@acme.test" => (2, "member", MEMBER_TOKEN),
        _ => return error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    };
    if body.password != "password" || body.tenant != "acme" {
        return error(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    Json(json!({
        "token": token,
        "user": { "id": id, "email": body.email, "role": role, "tenant": "acme" }
    }))
    .into_response()
}

fn tenant_json(state: &MockState) -> serde_json::Value {
    let limit = match state.plan {
        Plan::Free => json!(state.limit),
        Plan::Pro => serde_json::Value::Null,
    };
    json!({
        "name": "Acme Corporation",
        "plan": state.plan,
        "notesCount": state.notes.len(),
        "noteLimit": limit,
    })
}

async fn tenant(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(e) = caller(&headers) {
        return e;
    }
    let state = state.lock().unwrap();
    if state.fail_tenant {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    Json(tenant_json(&state)).into_response()
}

async fn list_notes(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(e) = caller(&headers) {
        return e;
    }
    Json(state.lock().unwrap().notes.clone()).into_response()
}

#[derive(Deserialize)]
struct NoteBody {
    title: String,
    #[serde(default)]
    content: Option<String>,
}

async fn create_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<NoteBody>,
) -> Response {
    if let Err(e) = caller(&headers) {
        return e;
    }
    let mut state = state.lock().unwrap();
    if state.plan == Plan::Free && state.notes.len() as u32 >= state.limit {
        if state.structured_limit_error {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Plan quota exhausted", "code": "NOTE_LIMIT_REACHED" })),
            )
                .into_response();
        }
        return error(
            StatusCode::FORBIDDEN,
            "Note limit reached. Upgrade to Pro for unlimited notes.",
        );
    }
    if body.title.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "Title is required");
    }
    let note = Note {
        id: Id::Number(state.next_id),
        title: body.title,
        content: body.content.filter(|c| !c.is_empty()),
        created_at: "2024-03-01T12:00:00.000Z".to_string(),
    };
    state.next_id += 1;
    state.notes.push(note.clone());
    (StatusCode::CREATED, Json(note)).into_response()
}

async fn update_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<NoteBody>,
) -> Response {
    if let Err(e) = caller(&headers) {
        return e;
    }
    let mut state = state.lock().unwrap();
    match state.notes.iter_mut().find(|n| n.id.to_string() == id) {
        Some(note) => {
            note.title = body.title;
            note.content = body.content.filter(|c| !c.is_empty());
            Json(note.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Note not found"),
    }
}

async fn delete_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(e) = caller(&headers) {
        return e;
    }
    let mut state = state.lock().unwrap();
    if state.fail_delete {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    let before = state.notes.len();
    state.notes.retain(|n| n.id.to_string() != id);
    if state.notes.len() == before {
        return error(StatusCode::NOT_FOUND, "Note not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn upgrade(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    match caller(&headers) {
        Ok(Role::Admin) => {}
        Ok(Role::Member) => return error(StatusCode::FORBIDDEN, "Admin access required"),
        Err(e) => return e,
    }
    let mut state = state.lock().unwrap();
    if state.fail_upgrade || id != "acme" {
        return error(StatusCode::FORBIDDEN, "Cannot upgrade this tenant");
    }
    state.plan = Plan::Pro;
    Json(tenant_json(&state)).into_response()
}

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response()
}

async fn empty_error() -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({}))).into_response()
}
