//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use std::fmt;

use crate::api;

pub const TENANT_FETCH_FAILED: &str = "Failed to fetch tenant information";
pub const NOTES_FETCH_FAILED: &str = "Failed to fetch notes";

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Logged-in user; `None` shows the login page
    pub user: RwSignal<Option<User>>,
    /// Tenant plan and usage
    pub tenant: RwSignal<Option<Tenant>>,
    /// Notes in server order
    pub notes: RwSignal<Vec<Note>>,
    /// Set while a mutating request is in flight
    pub loading: RwSignal<bool>,
    /// Error or success message, one at a time
    pub banner: RwSignal<Option<Banner>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Banner {
    Error(String),
    Success(String),
}

/// Opaque identifier, numeric or text
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Authenticated user
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    /// "admin" or "member"
    pub role: String,
    pub tenant: Id,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Role as shown on the plan panel, e.g. "ADMIN"
    pub fn role_label(&self) -> String {
        self.role.to_uppercase()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlanLimit {
    Unlimited,
    Limited(u32),
}

/// Tenant plan information
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(from = "TenantDto")]
pub struct Tenant {
    pub name: String,
    /// "free" or "pro"
    pub plan: String,
    pub notes_count: u32,
    pub limit: PlanLimit,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantDto {
    name: String,
    plan: String,
    #[serde(default)]
    notes_count: u32,
    #[serde(default)]
    note_limit: Option<u32>,
}

impl From<TenantDto> for Tenant {
    fn from(dto: TenantDto) -> Self {
        Self {
            name: dto.name,
            plan: dto.plan,
            notes_count: dto.notes_count,
            limit: match dto.note_limit {
                Some(max) => PlanLimit::Limited(max),
                None => PlanLimit::Unlimited,
            },
        }
    }
}

impl Tenant {
    pub fn is_free(&self) -> bool {
        self.plan == "free"
    }

    /// Free plan at or over its ceiling
    pub fn limit_reached(&self) -> bool {
        match self.limit {
            PlanLimit::Limited(max) => self.is_free() && self.notes_count >= max,
            PlanLimit::Unlimited => false,
        }
    }

    pub fn usage_label(&self) -> String {
        match self.limit {
            PlanLimit::Limited(max) => format!("{}/{}", self.notes_count, max),
            PlanLimit::Unlimited => format!("{} (unlimited)", self.notes_count),
        }
    }
}

/// A note from the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Note {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub created_at: String,
}

impl Note {
    /// Local calendar date of `created_at`
    pub fn created_date(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        user: create_rw_signal(None),
        tenant: create_rw_signal(None),
        notes: create_rw_signal(Vec::new()),
        loading: create_rw_signal(false),
        banner: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Create is disabled only for a free tenant at its limit
    pub fn can_create_note(&self) -> bool {
        self.tenant
            .with(|tenant| tenant.as_ref().map_or(true, |t| !t.limit_reached()))
    }

    pub fn show_success(&self, message: &str) {
        self.banner.set(Some(Banner::Success(message.to_string())));
    }

    pub fn show_error(&self, message: &str) {
        self.banner.set(Some(Banner::Error(message.to_string())));
    }

    /// Drop an error banner, keep a success one
    pub fn clear_error(&self) {
        if matches!(self.banner.get_untracked(), Some(Banner::Error(_))) {
            self.banner.set(None);
        }
    }

    pub fn clear_messages(&self) {
        self.banner.set(None);
    }

    /// Re-fetch tenant and notes from the server
    pub fn refresh(&self) {
        self.refresh_tenant();
        self.refresh_notes();
    }

    pub fn refresh_tenant(&self) {
        let state = *self;
        spawn_local(async move {
            match api::fetch_tenant().await {
                Ok(tenant) => state.tenant.set(Some(tenant)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Tenant fetch failed: {}", e).into());
                    state.show_error(TENANT_FETCH_FAILED);
                }
            }
        });
    }

    pub fn refresh_notes(&self) {
        let state = *self;
        spawn_local(async move {
            match api::fetch_notes().await {
                Ok(notes) => state.notes.set(notes),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Notes fetch failed: {}", e).into());
                    state.show_error(NOTES_FETCH_FAILED);
                }
            }
        });
    }

    /// Forget the session and everything loaded for it
    pub fn logout(&self) {
        crate::state::session::clear();
        self.user.set(None);
        self.tenant.set(None);
        self.notes.set(Vec::new());
        self.banner.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_null_limit() {
        let tenant: Tenant = serde_json::from_str(
            r#"{"name":"Acme","plan":"pro","notesCount":4,"noteLimit":null}"#,
        )
        .unwrap();
        assert_eq!(tenant.limit, PlanLimit::Unlimited);
        assert!(!tenant.limit_reached());
        assert_eq!(tenant.usage_label(), "4 (unlimited)");
    }

    #[test]
    fn test_role_label_is_upper_case() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"email":"admin@acme.test","role":"admin","tenant":"acme"}"#,
        )
        .unwrap();
        assert!(user.is_admin());
        assert_eq!(user.role_label(), "ADMIN");
    }

    #[test]
    fn test_free_tenant_at_limit() {
        let tenant: Tenant = serde_json::from_str(
            r#"{"name":"Acme","plan":"free","notesCount":3,"noteLimit":3}"#,
        )
        .unwrap();
        assert!(tenant.limit_reached());
        assert_eq!(tenant.usage_label(), "3/3");
    }
}
